//! Merge / Split Engine
//!
//! Joins adjacent tables into one merge-product and reverses it exactly.
//!
//! A merge is accepted when:
//! - at least two distinct, existing tables are named
//! - none of them is already a merge-product
//! - they are all round or all rectangular
//! - every table shares a full edge with another one in the set
//!   (zero tolerance), the set forms a single connected group, and the
//!   group tiles its bounding box exactly
//!
//! The merge-product takes the union bounding box, the summed capacity and
//! the source labels joined by `+` in creation order. The sources themselves
//! are archived under the product id with their full pre-merge state, so a
//! split re-inserts them unchanged.

use crate::geometry::{self, Rect};
use crate::store::{LayoutError, LayoutEvent, LayoutResult, LayoutStore};
use shared::models::{FloorTable, TableShape};
use shared::util::new_id;
use std::collections::HashSet;
use std::sync::Arc;

/// Full-edge contact only, no slack
const MERGE_TOLERANCE: f64 = 0.0;

/// Area slack when comparing the tiled area with the bounding box
const AREA_EPSILON: f64 = 1e-6;

impl LayoutStore {
    /// True if [`merge_tables`](Self::merge_tables) would succeed
    pub fn can_merge_tables(&self, ids: &[&str]) -> bool {
        self.check_merge(ids).is_ok()
    }

    /// Replace the given tables with a single merge-product.
    ///
    /// On rejection the store is left untouched.
    pub fn merge_tables(&mut self, ids: &[&str]) -> LayoutResult<FloorTable> {
        let indices = match self.check_merge(ids) {
            Ok(indices) => indices,
            Err(e) => {
                tracing::warn!(table_ids = ?ids, error = %e, "Merge rejected");
                return Err(e);
            }
        };

        let sources: Vec<FloorTable> = indices
            .iter()
            .map(|&i| (*self.state.tables[i]).clone())
            .collect();
        let merged = build_merge_product(&sources);

        self.checkpoint();
        for &i in indices.iter().rev() {
            self.state.tables.remove(i);
        }
        self.state
            .tables
            .insert(indices[0], Arc::new(merged.clone()));
        self.state
            .merge_archive
            .insert(merged.id.clone(), Arc::new(sources));
        for child in &merged.child_ids {
            self.forget_selection(child);
        }

        tracing::info!(
            merged_id = %merged.id,
            label = %merged.label,
            capacity = merged.capacity,
            "Tables merged"
        );
        self.emit(LayoutEvent::TablesMerged {
            merged_id: merged.id.clone(),
            source_ids: merged.child_ids.clone(),
        });
        Ok(merged)
    }

    /// Merge the current multi-selection
    pub fn merge_selected(&mut self) -> LayoutResult<FloorTable> {
        let ids = self.multi_selection().to_vec();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.merge_tables(&refs)
    }

    /// Remove a merge-product and restore the archived sources in its place.
    pub fn split_table(&mut self, id: &str) -> LayoutResult<Vec<FloorTable>> {
        let index = self
            .state
            .table_index(id)
            .ok_or_else(|| LayoutError::TableNotFound(id.to_string()))?;
        if !self.state.tables[index].is_merge_product() {
            tracing::warn!(table_id = %id, "Split rejected: not a merged table");
            return Err(LayoutError::NotMergeProduct(id.to_string()));
        }
        let children = self
            .state
            .merge_archive
            .get(id)
            .cloned()
            .ok_or_else(|| LayoutError::ArchiveMissing(id.to_string()))?;

        self.checkpoint();
        self.state.tables.remove(index);
        for (offset, child) in children.iter().enumerate() {
            self.state
                .tables
                .insert(index + offset, Arc::new(child.clone()));
        }
        self.state.merge_archive.remove(id);
        self.forget_selection(id);

        let restored_ids: Vec<String> = children.iter().map(|c| c.id.clone()).collect();
        tracing::info!(merged_id = %id, restored = restored_ids.len(), "Table split");
        self.emit(LayoutEvent::TableSplit {
            merged_id: id.to_string(),
            restored_ids,
        });
        Ok(children.to_vec())
    }

    /// Resolve and check a merge request. Returns collection indices, ascending.
    fn check_merge(&self, ids: &[&str]) -> LayoutResult<Vec<usize>> {
        if ids.len() < 2 {
            return Err(LayoutError::NotEnoughTables(ids.len()));
        }

        let mut seen = HashSet::new();
        let mut indices = Vec::with_capacity(ids.len());
        for &id in ids {
            if !seen.insert(id) {
                return Err(LayoutError::DuplicateSelection(id.to_string()));
            }
            let index = self
                .state
                .table_index(id)
                .ok_or_else(|| LayoutError::TableNotFound(id.to_string()))?;
            if self.state.tables[index].is_merge_product() {
                return Err(LayoutError::AlreadyMerged(id.to_string()));
            }
            indices.push(index);
        }
        indices.sort_unstable();

        let tables: Vec<&FloorTable> = indices.iter().map(|&i| &*self.state.tables[i]).collect();

        let rectangular = tables[0].shape.is_rectangular();
        if tables.iter().any(|t| t.shape.is_rectangular() != rectangular) {
            return Err(LayoutError::IncompatibleShapes);
        }

        let rects: Vec<Rect> = tables.iter().map(|t| Rect::from(*t)).collect();
        if !is_connected(&rects) {
            return Err(LayoutError::NotAdjacent);
        }
        if !tiles_bounding_box(&rects) {
            return Err(LayoutError::NotRectangular);
        }

        Ok(indices)
    }
}

/// Every box reachable from the first through full-edge contacts
fn is_connected(rects: &[Rect]) -> bool {
    let mut reached = vec![false; rects.len()];
    let mut stack = vec![0];
    reached[0] = true;

    while let Some(current) = stack.pop() {
        for (i, rect) in rects.iter().enumerate() {
            if !reached[i] && geometry::is_adjacent(&rects[current], rect, MERGE_TOLERANCE) {
                reached[i] = true;
                stack.push(i);
            }
        }
    }

    reached.into_iter().all(|r| r)
}

/// Boxes cover their union exactly (no holes, no L-shapes).
///
/// The area sum only proves coverage when no two boxes overlap, otherwise a
/// doubled region can hide a hole of the same size.
fn tiles_bounding_box(rects: &[Rect]) -> bool {
    let overlapping = rects
        .iter()
        .enumerate()
        .any(|(i, a)| rects[i + 1..].iter().any(|b| geometry::overlaps(a, b)));
    if overlapping {
        return false;
    }
    let Some(union) = geometry::bounding_box(rects) else {
        return false;
    };
    let covered: f64 = rects.iter().map(Rect::area).sum();
    (union.area() - covered).abs() <= AREA_EPSILON
}

fn build_merge_product(sources: &[FloorTable]) -> FloorTable {
    let rects: Vec<Rect> = sources.iter().map(Rect::from).collect();
    let bounds = geometry::bounding_box(&rects).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
    let first = &sources[0];

    let zone = first
        .zone
        .clone()
        .filter(|z| sources.iter().all(|s| s.zone.as_deref() == Some(z.as_str())));
    let shape = if bounds.w == bounds.h {
        TableShape::Square
    } else {
        TableShape::Rect
    };

    FloorTable {
        id: new_id(),
        label: sources
            .iter()
            .map(|s| s.label.as_str())
            .collect::<Vec<_>>()
            .join("+"),
        x: bounds.x,
        y: bounds.y,
        w: bounds.w,
        h: bounds.h,
        shape,
        capacity: sources.iter().map(|s| s.capacity).sum(),
        zone,
        rotation: None,
        child_ids: sources.iter().map(|s| s.id.clone()).collect(),
        status: first.status,
    }
}
