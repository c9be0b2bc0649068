//! Floor document persistence
//!
//! A [`FloorDocument`] is the complete serialisable form of one floor: every
//! table, zone and fixture plus the merge archive, so a merged table can
//! still be split after a reload. Documents are stored as pretty JSON at
//! `<dir>/<floor_id>.json`.

use crate::core::EditorConfig;
use crate::store::{LayoutSnapshot, LayoutStore};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Fixture, FloorTable, Zone};
use shared::util::now_millis;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Newest document layout this build reads and writes
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported document version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Merge archive does not match merged table: {0}")]
    ArchiveMismatch(String),

    #[error("Invalid floor id: {0:?}")]
    InvalidFloorId(String),
}

impl DocumentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DocumentError::Io(_) => ErrorCode::InternalError,
            DocumentError::Json(_) => ErrorCode::StorageCorrupted,
            DocumentError::UnsupportedVersion { .. } => ErrorCode::DocumentVersionUnsupported,
            DocumentError::ArchiveMismatch(_) => ErrorCode::DocumentArchiveMismatch,
            DocumentError::InvalidFloorId(_) => ErrorCode::InvalidRequest,
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            DocumentError::UnsupportedVersion { found, supported } => app
                .with_detail("found", found)
                .with_detail("supported", supported),
            DocumentError::ArchiveMismatch(id) => app.with_detail("table_id", id),
            DocumentError::InvalidFloorId(id) => app.with_detail("floor_id", id),
            DocumentError::Io(_) | DocumentError::Json(_) => app,
        }
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Serialised floor (楼层平面图)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorDocument {
    pub version: u32,
    pub floor_id: String,
    /// Unix millis
    pub saved_at: i64,
    pub tables: Vec<FloorTable>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
    /// merge-product id → archived source tables
    #[serde(default)]
    pub merge_archive: BTreeMap<String, Vec<FloorTable>>,
}

impl FloorDocument {
    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and check version and archive consistency
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let doc: FloorDocument = serde_json::from_str(json)?;
        doc.check()?;
        Ok(doc)
    }

    /// Version must be supported, every merge-product must have an archive
    /// entry whose ids equal its `childIds` (and vice versa), and no archived
    /// child may still be a live table.
    pub fn check(&self) -> DocumentResult<()> {
        if self.version > DOCUMENT_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                found: self.version,
                supported: DOCUMENT_VERSION,
            });
        }

        for table in self.tables.iter().filter(|t| t.is_merge_product()) {
            let children = self
                .merge_archive
                .get(&table.id)
                .ok_or_else(|| DocumentError::ArchiveMismatch(table.id.clone()))?;
            let archived = children.iter().map(|c| c.id.as_str());
            if !archived.eq(table.child_ids.iter().map(String::as_str)) {
                return Err(DocumentError::ArchiveMismatch(table.id.clone()));
            }
        }

        let live: HashSet<&str> = self.tables.iter().map(|t| t.id.as_str()).collect();
        for (merged_id, children) in &self.merge_archive {
            let owner = self.tables.iter().find(|t| &t.id == merged_id);
            if !owner.is_some_and(|t| t.is_merge_product()) {
                return Err(DocumentError::ArchiveMismatch(merged_id.clone()));
            }
            if children.iter().any(|c| live.contains(c.id.as_str())) {
                return Err(DocumentError::ArchiveMismatch(merged_id.clone()));
            }
        }
        Ok(())
    }

    /// `<dir>/<floor_id>.json`
    pub fn path_in(dir: impl AsRef<Path>, floor_id: &str) -> DocumentResult<PathBuf> {
        let valid = !floor_id.is_empty()
            && floor_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DocumentError::InvalidFloorId(floor_id.to_string()));
        }
        Ok(dir.as_ref().join(format!("{floor_id}.json")))
    }

    /// Write to `<dir>/<floor_id>.json`, creating `dir` if needed
    pub fn save(&self, dir: impl AsRef<Path>) -> DocumentResult<PathBuf> {
        let path = Self::path_in(&dir, &self.floor_id)?;
        fs::create_dir_all(dir.as_ref())?;
        fs::write(&path, self.to_json()?)?;
        tracing::info!(floor_id = %self.floor_id, path = %path.display(), tables = self.tables.len(), "Floor document saved");
        Ok(path)
    }

    pub fn load(dir: impl AsRef<Path>, floor_id: &str) -> DocumentResult<Self> {
        let path = Self::path_in(dir, floor_id)?;
        Self::load_file(&path)
    }

    pub fn load_file(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let doc = Self::from_json(&json).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Rejected floor document");
        })?;
        tracing::info!(floor_id = %doc.floor_id, path = %path.display(), "Floor document loaded");
        Ok(doc)
    }
}

impl From<FloorDocument> for LayoutSnapshot {
    fn from(doc: FloorDocument) -> Self {
        LayoutSnapshot {
            tables: doc.tables.into_iter().map(Arc::new).collect(),
            zones: doc.zones.into_iter().map(Arc::new).collect(),
            fixtures: doc.fixtures.into_iter().map(Arc::new).collect(),
            merge_archive: doc
                .merge_archive
                .into_iter()
                .map(|(id, children)| (id, Arc::new(children)))
                .collect(),
        }
    }
}

impl LayoutStore {
    /// Serialisable copy of the current state
    pub fn to_document(&self, floor_id: impl Into<String>) -> FloorDocument {
        let state = &self.state;
        FloorDocument {
            version: DOCUMENT_VERSION,
            floor_id: floor_id.into(),
            saved_at: now_millis(),
            tables: state.tables.iter().map(|t| (**t).clone()).collect(),
            zones: state.zones.iter().map(|z| (**z).clone()).collect(),
            fixtures: state.fixtures.iter().map(|f| (**f).clone()).collect(),
            merge_archive: state
                .merge_archive
                .iter()
                .map(|(id, children)| (id.clone(), children.to_vec()))
                .collect(),
        }
    }

    /// Fresh store holding the document's floor
    pub fn from_document(doc: FloorDocument, config: EditorConfig) -> DocumentResult<Self> {
        let mut store = LayoutStore::new(config);
        store.load_document(doc)?;
        Ok(store)
    }

    /// Replace the current floor and emit `Reloaded`. History and selection
    /// are dropped.
    ///
    /// On error the store is left untouched.
    pub fn load_document(&mut self, doc: FloorDocument) -> DocumentResult<()> {
        doc.check()?;
        let floor_id = doc.floor_id.clone();
        let tables = doc.tables.len();
        self.replace_state(doc.into());
        tracing::info!(floor_id = %floor_id, tables, "Floor layout loaded");
        Ok(())
    }
}
