//! Data models
//!
//! Shared between the editor core and its collaborators (persistence,
//! status sync, QR/reservation readers). Field names serialize as camelCase
//! to match the stored floor documents.

pub mod fixture;
pub mod floor_table;
pub mod zone;

// Re-exports
pub use fixture::*;
pub use floor_table::*;
pub use zone::*;
