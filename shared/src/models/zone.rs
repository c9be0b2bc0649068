//! Zone Model

use serde::{Deserialize, Serialize};

/// Zone entity (区域：大厅、露台、包厢等)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub color: String,
    pub is_visible: bool,
}

/// Create zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneCreate {
    pub name: String,
    pub color: String,
    /// Defaults to visible
    pub is_visible: Option<bool>,
}

impl ZoneCreate {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            is_visible: None,
        }
    }
}
