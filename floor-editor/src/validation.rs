//! Validation Engine
//!
//! On-demand audit of the table collection. Never mutates, never fails:
//! every finding is returned as data so the editor can highlight problems
//! while the operator is still dragging things around.

use crate::geometry::{self, Rect};
use crate::store::LayoutStore;
use serde::{Deserialize, Serialize};
use shared::error::ErrorCode;
use shared::models::FloorTable;
use std::collections::HashSet;

/// Invariant violated by the current layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    TablesOverlap,
    /// Repeated id or repeated label
    DuplicateTableId,
    InvalidCapacity,
    TableOutOfBounds,
}

impl ValidationCode {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ValidationCode::TablesOverlap => ErrorCode::TablesOverlap,
            ValidationCode::DuplicateTableId => ErrorCode::DuplicateTableId,
            ValidationCode::InvalidCapacity => ErrorCode::InvalidCapacity,
            ValidationCode::TableOutOfBounds => ErrorCode::TableOutOfBounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Each code at most once, in declaration order
    pub errors: Vec<ValidationCode>,
    /// Every table taking part in at least one overlapping pair
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlapping_tables: Vec<FloorTable>,
}

impl ValidationReport {
    pub fn has(&self, code: ValidationCode) -> bool {
        self.errors.contains(&code)
    }
}

/// Audit `tables` against the canvas `[0, max_x] × [0, max_y]`
pub fn validate_tables<'a>(
    tables: impl IntoIterator<Item = &'a FloorTable>,
    max_x: f64,
    max_y: f64,
) -> ValidationReport {
    let tables: Vec<&FloorTable> = tables.into_iter().collect();
    let rects: Vec<Rect> = tables.iter().map(|t| Rect::from(*t)).collect();
    let mut errors = Vec::new();

    // overlap, all pairs
    let mut overlapping = vec![false; tables.len()];
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if geometry::overlaps(&rects[i], &rects[j]) {
                overlapping[i] = true;
                overlapping[j] = true;
            }
        }
    }
    let overlapping_tables: Vec<FloorTable> = tables
        .iter()
        .zip(&overlapping)
        .filter(|(_, hit)| **hit)
        .map(|(t, _)| (*t).clone())
        .collect();
    if !overlapping_tables.is_empty() {
        errors.push(ValidationCode::TablesOverlap);
    }

    let mut ids = HashSet::new();
    let mut labels = HashSet::new();
    let duplicate = tables
        .iter()
        .any(|t| !ids.insert(t.id.as_str()) | !labels.insert(t.label.as_str()));
    if duplicate {
        errors.push(ValidationCode::DuplicateTableId);
    }

    if tables.iter().any(|t| t.capacity < 1) {
        errors.push(ValidationCode::InvalidCapacity);
    }

    if rects.iter().any(|r| !r.within(max_x, max_y)) {
        errors.push(ValidationCode::TableOutOfBounds);
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        overlapping_tables,
    }
}

impl LayoutStore {
    /// Audit the full table collection, hidden zones included
    pub fn validate_layout(&self) -> ValidationReport {
        let config = self.config();
        let report = validate_tables(self.tables(), config.canvas_width, config.canvas_height);
        if !report.is_valid {
            tracing::debug!(errors = ?report.errors, overlapping = report.overlapping_tables.len(), "Layout has findings");
        }
        report
    }
}
