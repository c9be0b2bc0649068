//! Fixture Model

use serde::{Deserialize, Serialize};

/// Kind of non-seating object placed on the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    Wall,
    Bar,
    Planter,
    Door,
    Window,
    Other,
}

/// Fixture entity (墙、吧台、花槽)
///
/// Shares the coordinate space with tables but never takes part in table
/// overlap or merge checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: String,
    pub kind: FixtureKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Create fixture payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCreate {
    pub kind: FixtureKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}
