//! LayoutStore - canonical floor layout state
//!
//! Owns the tables, zones and fixtures of one floor plus the current
//! selection, and exposes every mutating operation. Each mutation records
//! the replaced state in [`CommandHistory`] before touching anything, then
//! notifies subscribers.
//!
//! # Operation Flow
//!
//! ```text
//! move_table(id, x, y)
//!     ├─ 1. Resolve id (unknown → no-op)
//!     ├─ 2. Snap to grid, clamp to canvas
//!     ├─ 3. Unchanged → return without a history entry
//!     ├─ 4. Record snapshot in history (clears redo)
//!     ├─ 5. Replace the table's Arc
//!     └─ 6. Emit LayoutEvent
//! ```
//!
//! Spatial invariants (overlap, bounds, unique labels, capacity) are not
//! enforced here; the editor must be able to show transient invalid states.
//! See [`crate::validation`].

mod error;
mod events;
mod snapshot;

pub use error::*;
pub use events::{LayoutEvent, Listener, SubscriptionId};
pub use snapshot::LayoutSnapshot;

use crate::core::EditorConfig;
use crate::geometry::{self, Direction, Rect};
use crate::history::CommandHistory;
use shared::models::{
    Fixture, FixtureCreate, FloorTable, TableCreate, TableShape, TableStatus, TableUpdate, Zone,
    ZoneCreate,
};
use shared::util::new_id;
use std::sync::Arc;

/// Floor layout editor session state
pub struct LayoutStore {
    config: EditorConfig,
    pub(crate) state: LayoutSnapshot,
    selected: Option<String>,
    /// Merge candidates, in the order they were picked
    multi_selection: Vec<String>,
    history: CommandHistory<LayoutSnapshot>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStore")
            .field("tables", &self.state.tables.len())
            .field("zones", &self.state.zones.len())
            .field("fixtures", &self.state.fixtures.len())
            .field("selected", &self.selected)
            .field("undo_len", &self.history.undo_len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl LayoutStore {
    /// Create an empty store
    pub fn new(config: EditorConfig) -> Self {
        let history = CommandHistory::new(config.history_depth);
        Self {
            config,
            state: LayoutSnapshot::default(),
            selected: None,
            multi_selection: Vec::new(),
            history,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All tables in creation order, hidden zones included
    pub fn tables(&self) -> impl Iterator<Item = &FloorTable> + '_ {
        self.state.tables.iter().map(|t| &**t)
    }

    pub fn table_count(&self) -> usize {
        self.state.tables.len()
    }

    pub fn table(&self, id: &str) -> Option<&FloorTable> {
        self.state
            .tables
            .iter()
            .find(|t| t.id == id)
            .map(|t| &**t)
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> + '_ {
        self.state.zones.iter().map(|z| &**z)
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.state.zones.iter().find(|z| z.id == id).map(|z| &**z)
    }

    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> + '_ {
        self.state.fixtures.iter().map(|f| &**f)
    }

    pub fn fixture(&self, id: &str) -> Option<&Fixture> {
        self.state
            .fixtures
            .iter()
            .find(|f| f.id == id)
            .map(|f| &**f)
    }

    /// Tables without a zone, or whose zone exists and is visible
    pub fn visible_tables(&self) -> Vec<&FloorTable> {
        self.tables()
            .filter(|t| match &t.zone {
                None => true,
                Some(zone_id) => self.zone(zone_id).is_some_and(|z| z.is_visible),
            })
            .collect()
    }

    /// Top-most table under the point (later tables are drawn on top)
    pub fn table_at(&self, x: f64, y: f64) -> Option<&FloorTable> {
        self.state
            .tables
            .iter()
            .rev()
            .find(|t| Rect::from(&***t).contains_point(x, y))
            .map(|t| &**t)
    }

    /// Archived source tables of a merge-product
    pub fn merge_archive(&self, merged_id: &str) -> Option<&[FloorTable]> {
        self.state
            .merge_archive
            .get(merged_id)
            .map(|children| children.as_slice())
    }

    pub fn selected_table(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn multi_selection(&self) -> &[String] {
        &self.multi_selection
    }

    // ========================================================================
    // Tables
    // ========================================================================

    /// Create a table from a partial description.
    ///
    /// Label defaults to `T<count+1>`, capacity to the configured default,
    /// size to a square side (doubled in width for `rect`). The position is
    /// stored as supplied, without snapping.
    pub fn add_table(&mut self, create: TableCreate) -> FloorTable {
        let shape = create.shape.unwrap_or_default();
        let (default_w, default_h) = self.default_size(shape);
        let table = FloorTable {
            id: new_id(),
            label: create
                .label
                .unwrap_or_else(|| format!("T{}", self.state.tables.len() + 1)),
            x: create.x.unwrap_or(0.0),
            y: create.y.unwrap_or(0.0),
            w: create.w.unwrap_or(default_w),
            h: create.h.unwrap_or(default_h),
            shape,
            capacity: create.capacity.unwrap_or(self.config.default_capacity),
            zone: create.zone,
            rotation: create.rotation,
            child_ids: Vec::new(),
            status: create.status.unwrap_or(TableStatus::Available),
        };

        self.checkpoint();
        self.state.tables.push(Arc::new(table.clone()));
        tracing::debug!(table_id = %table.id, label = %table.label, x = table.x, y = table.y, "Table added");
        self.emit(LayoutEvent::TableAdded {
            id: table.id.clone(),
        });
        table
    }

    /// Snap `(x, y)` to the grid and store it. Unknown id is a no-op.
    ///
    /// Overlap is not checked; the position is only kept inside the canvas.
    pub fn move_table(&mut self, id: &str, x: f64, y: f64) -> Option<FloorTable> {
        let current = self.table(id)?;
        let (x, y) = self.settle(x, y, current.w, current.h);
        let (table, changed) = self.edit_table(id, |t| {
            t.x = x;
            t.y = y;
        })?;
        if changed {
            tracing::debug!(table_id = %id, x, y, "Table moved");
            self.emit(LayoutEvent::TableMoved {
                id: table.id.clone(),
                x,
                y,
            });
        }
        Some(table)
    }

    /// Resize, raising either side to the minimum size. Never rejects.
    pub fn resize_table(&mut self, id: &str, w: f64, h: f64) -> Option<FloorTable> {
        let min = self.config.min_table_size;
        let (w, h) = (w.max(min), h.max(min));
        let (table, changed) = self.edit_table(id, |t| {
            t.w = w;
            t.h = h;
        })?;
        if changed {
            tracing::debug!(table_id = %id, w, h, "Table resized");
            self.emit(LayoutEvent::TableResized {
                id: table.id.clone(),
                w,
                h,
            });
        }
        Some(table)
    }

    /// Shallow-merge the patch. Uniqueness and capacity are left to validation.
    pub fn update_table(&mut self, id: &str, patch: TableUpdate) -> Option<FloorTable> {
        let (table, changed) = self.edit_table(id, |t| {
            if let Some(label) = patch.label {
                t.label = label;
            }
            if let Some(capacity) = patch.capacity {
                t.capacity = capacity;
            }
            if let Some(shape) = patch.shape {
                t.shape = shape;
            }
            if let Some(zone) = patch.zone {
                t.zone = zone;
            }
            if let Some(status) = patch.status {
                t.status = status;
            }
            if let Some(rotation) = patch.rotation {
                t.rotation = Some(rotation);
            }
        })?;
        if changed {
            tracing::debug!(table_id = %id, "Table updated");
            self.emit(LayoutEvent::TableUpdated {
                id: table.id.clone(),
            });
        }
        Some(table)
    }

    /// Set the cosmetic rotation, normalised to `[0, 360)`
    pub fn rotate_table(&mut self, id: &str, degrees: f64) -> Option<FloorTable> {
        self.update_table(
            id,
            TableUpdate {
                rotation: Some(degrees.rem_euclid(360.0)),
                ..Default::default()
            },
        )
    }

    /// Remove a table. Remaining labels are not renumbered.
    pub fn delete_table(&mut self, id: &str) -> Option<FloorTable> {
        let index = self.state.table_index(id)?;

        self.checkpoint();
        let removed = self.state.tables.remove(index);
        // a deleted merge-product takes its sources with it
        self.state.merge_archive.remove(id);
        self.forget_selection(id);

        tracing::debug!(table_id = %id, label = %removed.label, "Table deleted");
        self.emit(LayoutEvent::TableDeleted { id: id.to_string() });
        Some(Arc::unwrap_or_clone(removed))
    }

    /// Move one grid unit, stopping at the canvas edge
    ///
    /// A table sitting off the grid (added at a raw position) lands on the
    /// nearest grid line in the nudge direction first; every later nudge is
    /// exactly one grid unit.
    pub fn nudge_table(&mut self, id: &str, direction: Direction) -> Option<FloorTable> {
        let current = self.table(id)?;
        let (dx, dy) = direction.delta(self.config.grid_size);
        let (x, y) = (current.x + dx, current.y + dy);
        self.move_table(id, x, y)
    }

    // ========================================================================
    // Zones
    // ========================================================================

    pub fn add_zone(&mut self, create: ZoneCreate) -> Zone {
        let zone = Zone {
            id: new_id(),
            name: create.name,
            color: create.color,
            is_visible: create.is_visible.unwrap_or(true),
        };

        self.checkpoint();
        self.state.zones.push(Arc::new(zone.clone()));
        tracing::debug!(zone_id = %zone.id, name = %zone.name, "Zone added");
        self.emit(LayoutEvent::ZoneAdded {
            id: zone.id.clone(),
        });
        zone
    }

    /// Flip visibility, returning the new value. Unknown id is a no-op.
    pub fn toggle_zone_visibility(&mut self, id: &str) -> Option<bool> {
        let index = self.state.zone_index(id)?;

        self.checkpoint();
        let zone = Arc::make_mut(&mut self.state.zones[index]);
        zone.is_visible = !zone.is_visible;
        let is_visible = zone.is_visible;

        tracing::debug!(zone_id = %id, is_visible, "Zone visibility toggled");
        self.emit(LayoutEvent::ZoneVisibilityChanged {
            id: id.to_string(),
            is_visible,
        });
        Some(is_visible)
    }

    /// Remove a zone and clear every table reference to it, archived
    /// merge sources included.
    pub fn remove_zone(&mut self, id: &str) -> LayoutResult<Zone> {
        let index = self
            .state
            .zone_index(id)
            .ok_or_else(|| LayoutError::ZoneNotFound(id.to_string()))?;

        self.checkpoint();
        let removed = self.state.zones.remove(index);
        for table in self.state.tables.iter_mut() {
            if table.zone.as_deref() == Some(id) {
                Arc::make_mut(table).zone = None;
            }
        }
        for children in self.state.merge_archive.values_mut() {
            if children.iter().any(|c| c.zone.as_deref() == Some(id)) {
                for child in Arc::make_mut(children).iter_mut() {
                    if child.zone.as_deref() == Some(id) {
                        child.zone = None;
                    }
                }
            }
        }

        tracing::debug!(zone_id = %id, "Zone removed");
        self.emit(LayoutEvent::ZoneRemoved { id: id.to_string() });
        Ok(Arc::unwrap_or_clone(removed))
    }

    // ========================================================================
    // Fixtures
    // ========================================================================

    pub fn add_fixture(&mut self, create: FixtureCreate) -> Fixture {
        let fixture = Fixture {
            id: new_id(),
            kind: create.kind,
            x: create.x,
            y: create.y,
            w: create.w,
            h: create.h,
        };

        self.checkpoint();
        self.state.fixtures.push(Arc::new(fixture.clone()));
        tracing::debug!(fixture_id = %fixture.id, kind = ?fixture.kind, "Fixture added");
        self.emit(LayoutEvent::FixtureAdded {
            id: fixture.id.clone(),
        });
        fixture
    }

    /// Snapped and clamped like [`move_table`](Self::move_table)
    pub fn move_fixture(&mut self, id: &str, x: f64, y: f64) -> LayoutResult<Fixture> {
        let index = self
            .state
            .fixture_index(id)
            .ok_or_else(|| LayoutError::FixtureNotFound(id.to_string()))?;
        let current = &self.state.fixtures[index];
        let (x, y) = self.settle(x, y, current.w, current.h);
        if current.x == x && current.y == y {
            return Ok((**current).clone());
        }

        self.checkpoint();
        let fixture = Arc::make_mut(&mut self.state.fixtures[index]);
        fixture.x = x;
        fixture.y = y;
        let moved = fixture.clone();

        tracing::debug!(fixture_id = %id, x, y, "Fixture moved");
        self.emit(LayoutEvent::FixtureMoved {
            id: id.to_string(),
            x,
            y,
        });
        Ok(moved)
    }

    pub fn remove_fixture(&mut self, id: &str) -> LayoutResult<Fixture> {
        let index = self
            .state
            .fixture_index(id)
            .ok_or_else(|| LayoutError::FixtureNotFound(id.to_string()))?;

        self.checkpoint();
        let removed = self.state.fixtures.remove(index);
        tracing::debug!(fixture_id = %id, "Fixture removed");
        self.emit(LayoutEvent::FixtureRemoved { id: id.to_string() });
        Ok(Arc::unwrap_or_clone(removed))
    }

    // ========================================================================
    // Selection (view state, not recorded in history)
    // ========================================================================

    /// Set the single selection. An unknown id clears it.
    pub fn select_table(&mut self, id: Option<&str>) {
        let next = id.filter(|id| self.state.contains_table(id)).map(String::from);
        if next != self.selected {
            self.selected = next;
            self.emit(LayoutEvent::SelectionChanged);
        }
    }

    /// Add or remove a merge candidate. Returns whether it is now selected.
    pub fn toggle_table_selection(&mut self, id: &str) -> bool {
        if let Some(pos) = self.multi_selection.iter().position(|s| s == id) {
            self.multi_selection.remove(pos);
            self.emit(LayoutEvent::SelectionChanged);
            return false;
        }
        if !self.state.contains_table(id) {
            return false;
        }
        self.multi_selection.push(id.to_string());
        self.emit(LayoutEvent::SelectionChanged);
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected.is_some() || !self.multi_selection.is_empty() {
            self.selected = None;
            self.multi_selection.clear();
            self.emit(LayoutEvent::SelectionChanged);
        }
    }

    // ========================================================================
    // Undo / Redo
    // ========================================================================

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(|| self.state.clone()) else {
            return false;
        };
        self.state = previous;
        self.prune_selection();
        tracing::debug!(undo_len = self.history.undo_len(), "Undo");
        self.emit(LayoutEvent::Undone);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(|| self.state.clone()) else {
            return false;
        };
        self.state = next;
        self.prune_selection();
        tracing::debug!(redo_len = self.history.redo_len(), "Redo");
        self.emit(LayoutEvent::Redone);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of steps `undo` can currently walk back
    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register a listener called after every successful operation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&LayoutEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // ========================================================================
    // Internals shared with merge / document
    // ========================================================================

    /// Record the current state before a mutation
    pub(crate) fn checkpoint(&mut self) {
        self.history.record(self.state.clone());
    }

    pub(crate) fn emit(&mut self, event: LayoutEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Replace the whole state, dropping history and selection
    pub(crate) fn replace_state(&mut self, state: LayoutSnapshot) {
        self.state = state;
        self.history.clear();
        self.selected = None;
        self.multi_selection.clear();
        self.emit(LayoutEvent::Reloaded);
    }

    pub(crate) fn forget_selection(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.multi_selection.retain(|s| s != id);
    }

    /// Apply `f` to a copy of the table and swap it in if anything changed.
    /// Returns the resulting table and whether a history entry was recorded.
    fn edit_table<F>(&mut self, id: &str, f: F) -> Option<(FloorTable, bool)>
    where
        F: FnOnce(&mut FloorTable),
    {
        let index = self.state.table_index(id)?;
        let mut edited = (*self.state.tables[index]).clone();
        f(&mut edited);
        if edited == *self.state.tables[index] {
            return Some((edited, false));
        }

        self.checkpoint();
        self.state.tables[index] = Arc::new(edited.clone());
        Some((edited, true))
    }

    /// Snap to the grid, clamp into the canvas, and keep the result aligned
    fn settle(&self, x: f64, y: f64, w: f64, h: f64) -> (f64, f64) {
        let grid = self.config.grid_size;
        let (x, y) = geometry::clamp_to_bounds(
            geometry::snap(x, grid),
            geometry::snap(y, grid),
            w,
            h,
            self.config.canvas_width,
            self.config.canvas_height,
        );
        // the clamped edge may sit between grid lines
        (geometry::snap_down(x, grid), geometry::snap_down(y, grid))
    }

    fn default_size(&self, shape: TableShape) -> (f64, f64) {
        let side = self.config.default_table_size;
        match shape {
            TableShape::Round | TableShape::Square => (side, side),
            TableShape::Rect => (side * 2.0, side),
        }
    }

    fn prune_selection(&mut self) {
        if self
            .selected
            .as_deref()
            .is_some_and(|id| !self.state.contains_table(id))
        {
            self.selected = None;
        }
        let state = &self.state;
        self.multi_selection.retain(|id| state.contains_table(id));
    }
}

#[cfg(test)]
mod tests;
