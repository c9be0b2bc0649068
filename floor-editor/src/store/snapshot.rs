//! Layout snapshot
//!
//! Collections are vectors of `Arc`s. Cloning a snapshot copies pointers
//! only; an edit replaces the single `Arc` it touches, so retained history
//! entries share every untouched entity with the live state.

use shared::models::{Fixture, FloorTable, Zone};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    /// Creation order, drives `T<n>` labels
    pub(crate) tables: Vec<Arc<FloorTable>>,
    pub(crate) zones: Vec<Arc<Zone>>,
    pub(crate) fixtures: Vec<Arc<Fixture>>,
    /// merge-product id → tables it replaced, pre-merge geometry intact
    pub(crate) merge_archive: BTreeMap<String, Arc<Vec<FloorTable>>>,
}

impl LayoutSnapshot {
    pub(crate) fn table_index(&self, id: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.id == id)
    }

    pub(crate) fn zone_index(&self, id: &str) -> Option<usize> {
        self.zones.iter().position(|z| z.id == id)
    }

    pub(crate) fn fixture_index(&self, id: &str) -> Option<usize> {
        self.fixtures.iter().position(|f| f.id == id)
    }

    pub(crate) fn contains_table(&self, id: &str) -> bool {
        self.table_index(id).is_some()
    }
}
