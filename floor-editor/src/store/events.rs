//! Layout change notifications
//!
//! Emitted after every successful store operation so a view layer can
//! re-render without polling.

use serde::Serialize;

/// Handle returned by [`LayoutStore::subscribe`](super::LayoutStore::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

/// Callback invoked with every event
pub type Listener = Box<dyn FnMut(&LayoutEvent)>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutEvent {
    TableAdded { id: String },
    TableMoved { id: String, x: f64, y: f64 },
    TableResized { id: String, w: f64, h: f64 },
    TableUpdated { id: String },
    TableDeleted { id: String },
    TablesMerged { merged_id: String, source_ids: Vec<String> },
    TableSplit { merged_id: String, restored_ids: Vec<String> },
    ZoneAdded { id: String },
    ZoneVisibilityChanged { id: String, is_visible: bool },
    ZoneRemoved { id: String },
    FixtureAdded { id: String },
    FixtureMoved { id: String, x: f64, y: f64 },
    FixtureRemoved { id: String },
    SelectionChanged,
    Undone,
    Redone,
    /// Collections replaced from a floor document
    Reloaded,
}
