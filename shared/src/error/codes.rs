//! Unified error codes for the floor layout editor
//!
//! Error codes are organized by category:
//! - 0xxx: General errors (malformed requests)
//! - 7xxx: Table / floor layout errors
//!   - 70xx tables, 71xx zones, 72xx fixtures
//!   - 73xx merge/split
//!   - 74xx validation findings
//!   - 75xx floor documents
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Invalid request (repeated ids, unusable floor id)
    InvalidRequest = 5,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Zone not found
    ZoneNotFound = 7101,
    /// Fixture not found
    FixtureNotFound = 7201,

    /// Fewer than two tables selected for a merge
    MergeTooFewTables = 7301,
    /// Tables do not share full edges
    MergeNotAdjacent = 7302,
    /// Round and rectangular tables cannot be joined
    MergeIncompatibleShapes = 7303,
    /// Table is already a merge-product
    TableAlreadyMerged = 7304,
    /// Table is not a merge-product
    NotMergeProduct = 7305,
    /// Merge archive entry missing
    MergeArchiveMissing = 7306,
    /// Merged tables would not form a rectangle
    MergeNotRectangular = 7307,

    /// Two tables overlap
    TablesOverlap = 7401,
    /// Two tables share an identifier or label
    DuplicateTableId = 7402,
    /// Capacity below one seat
    InvalidCapacity = 7403,
    /// Table outside the canvas
    TableOutOfBounds = 7404,

    /// Floor document version is not supported
    DocumentVersionUnsupported = 7501,
    /// Merge-product children do not match the archive
    DocumentArchiveMismatch = 7502,

    // ==================== 9xxx: System ====================
    /// Internal error (file system failure)
    InternalError = 9001,
    /// Storage corrupted (floor document unreadable)
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::InvalidRequest => "Invalid request",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::ZoneNotFound => "Zone not found",
            ErrorCode::FixtureNotFound => "Fixture not found",
            ErrorCode::MergeTooFewTables => "At least two tables are required to merge",
            ErrorCode::MergeNotAdjacent => "Tables are not adjacent",
            ErrorCode::MergeIncompatibleShapes => "Table shapes cannot be merged",
            ErrorCode::TableAlreadyMerged => "Table is already merged",
            ErrorCode::NotMergeProduct => "Table is not a merged table",
            ErrorCode::MergeArchiveMissing => "Merge archive entry is missing",
            ErrorCode::MergeNotRectangular => "Merged tables would not form a rectangle",
            ErrorCode::TablesOverlap => "Tables overlap",
            ErrorCode::DuplicateTableId => "Duplicate table identifier",
            ErrorCode::InvalidCapacity => "Table capacity must be at least one",
            ErrorCode::TableOutOfBounds => "Table is outside the floor bounds",
            ErrorCode::DocumentVersionUnsupported => "Floor document version is not supported",
            ErrorCode::DocumentArchiveMismatch => "Floor document merge archive is inconsistent",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageCorrupted => "Storage data is corrupted",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            5 => Ok(ErrorCode::InvalidRequest),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7101 => Ok(ErrorCode::ZoneNotFound),
            7201 => Ok(ErrorCode::FixtureNotFound),
            7301 => Ok(ErrorCode::MergeTooFewTables),
            7302 => Ok(ErrorCode::MergeNotAdjacent),
            7303 => Ok(ErrorCode::MergeIncompatibleShapes),
            7304 => Ok(ErrorCode::TableAlreadyMerged),
            7305 => Ok(ErrorCode::NotMergeProduct),
            7306 => Ok(ErrorCode::MergeArchiveMissing),
            7307 => Ok(ErrorCode::MergeNotRectangular),
            7401 => Ok(ErrorCode::TablesOverlap),
            7402 => Ok(ErrorCode::DuplicateTableId),
            7403 => Ok(ErrorCode::InvalidCapacity),
            7404 => Ok(ErrorCode::TableOutOfBounds),
            7501 => Ok(ErrorCode::DocumentVersionUnsupported),
            7502 => Ok(ErrorCode::DocumentArchiveMismatch),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
