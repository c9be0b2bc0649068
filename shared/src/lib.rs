//! Shared types for the floor layout editor
//!
//! Data model (tables, zones, fixtures) and the unified error-code system used
//! by the editor core and by every collaborator that reads or persists a floor.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
