use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Rejected layout operations. The store is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    #[error("Fixture not found: {0}")]
    FixtureNotFound(String),

    #[error("At least two tables are required to merge, got {0}")]
    NotEnoughTables(usize),

    #[error("Table listed more than once: {0}")]
    DuplicateSelection(String),

    #[error("Table is already merged: {0}")]
    AlreadyMerged(String),

    #[error("Tables are not adjacent")]
    NotAdjacent,

    #[error("Round and rectangular tables cannot be merged")]
    IncompatibleShapes,

    #[error("Merged tables would not form a rectangle")]
    NotRectangular,

    #[error("Table is not a merged table: {0}")]
    NotMergeProduct(String),

    #[error("Merge archive missing for table: {0}")]
    ArchiveMissing(String),
}

impl LayoutError {
    /// 错误码（前端负责本地化）
    pub fn code(&self) -> ErrorCode {
        match self {
            LayoutError::TableNotFound(_) => ErrorCode::TableNotFound,
            LayoutError::ZoneNotFound(_) => ErrorCode::ZoneNotFound,
            LayoutError::FixtureNotFound(_) => ErrorCode::FixtureNotFound,
            LayoutError::NotEnoughTables(_) => ErrorCode::MergeTooFewTables,
            LayoutError::DuplicateSelection(_) => ErrorCode::InvalidRequest,
            LayoutError::AlreadyMerged(_) => ErrorCode::TableAlreadyMerged,
            LayoutError::NotAdjacent => ErrorCode::MergeNotAdjacent,
            LayoutError::IncompatibleShapes => ErrorCode::MergeIncompatibleShapes,
            LayoutError::NotRectangular => ErrorCode::MergeNotRectangular,
            LayoutError::NotMergeProduct(_) => ErrorCode::NotMergeProduct,
            LayoutError::ArchiveMissing(_) => ErrorCode::MergeArchiveMissing,
        }
    }
}

impl From<LayoutError> for AppError {
    fn from(err: LayoutError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let app = AppError::with_message(code, message);
        match err {
            LayoutError::TableNotFound(id)
            | LayoutError::DuplicateSelection(id)
            | LayoutError::AlreadyMerged(id)
            | LayoutError::NotMergeProduct(id)
            | LayoutError::ArchiveMissing(id) => app.with_detail("table_id", id),
            LayoutError::ZoneNotFound(id) => app.with_detail("zone_id", id),
            LayoutError::FixtureNotFound(id) => app.with_detail("fixture_id", id),
            LayoutError::NotEnoughTables(count) => app.with_detail("count", count),
            LayoutError::NotAdjacent
            | LayoutError::IncompatibleShapes
            | LayoutError::NotRectangular => app,
        }
    }
}

pub type LayoutResult<T> = Result<T, LayoutError>;
