//! Floor Table Model

use serde::{Deserialize, Serialize};

/// Visual shape of a table.
///
/// Collision math always uses the bounding box; the shape only matters for
/// default sizing and for deciding which tables may be merged together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    Round,
    #[default]
    Square,
    Rect,
}

impl TableShape {
    /// Round tables have no straight edge to join along
    pub fn is_rectangular(&self) -> bool {
        !matches!(self, TableShape::Round)
    }
}

/// Operational state, owned by the status-sync collaborator (桌台状态)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
    Maintenance,
}

/// Placed seating unit on a floor plan (桌台)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorTable {
    pub id: String,
    pub label: String,
    /// Top-left corner, layout units
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub shape: TableShape,
    pub capacity: i32,
    /// Back-reference to a zone id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Cosmetic only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Ids of the tables absorbed by a merge. Non-empty marks a merge-product.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_ids: Vec<String>,
    #[serde(default)]
    pub status: TableStatus,
}

impl FloorTable {
    pub fn is_merge_product(&self) -> bool {
        !self.child_ids.is_empty()
    }
}

/// Create table payload
///
/// Every field is optional; the store fills in the id, the `T<n>` label,
/// the default capacity and a shape-dependent default size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCreate {
    pub label: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub shape: Option<TableShape>,
    pub capacity: Option<i32>,
    pub zone: Option<String>,
    pub rotation: Option<f64>,
    pub status: Option<TableStatus>,
}

impl TableCreate {
    /// Payload positioned at `(x, y)` with every other field defaulted
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn with_shape(mut self, shape: TableShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_size(mut self, w: f64, h: f64) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn in_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone = Some(zone_id.into());
        self
    }
}

/// Update table payload (shallow merge, nothing validated at write time)
///
/// `zone: Some(None)` clears the zone reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    pub label: Option<String>,
    pub capacity: Option<i32>,
    pub shape: Option<TableShape>,
    pub zone: Option<Option<String>>,
    pub status: Option<TableStatus>,
    pub rotation: Option<f64>,
}
