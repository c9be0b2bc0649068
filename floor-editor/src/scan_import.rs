//! Scan-import adapter
//!
//! Turns detections from a photo/scan pipeline into ordinary store calls.
//! Candidates go through `add_table` / `add_fixture` exactly like manual
//! edits, so every import step is undoable and observable.

use crate::store::LayoutStore;
use serde::{Deserialize, Serialize};
use shared::models::{FixtureCreate, FixtureKind, TableCreate, TableShape};

/// What a detection was classified as
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CandidateKind {
    Table {
        shape: TableShape,
        /// Estimated seats, store default when absent
        #[serde(default)]
        capacity: Option<i32>,
    },
    Fixture {
        kind: FixtureKind,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanCandidate {
    pub kind: CandidateKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Detector confidence in `[0, 1]`
    pub confidence: f64,
}

impl ScanCandidate {
    fn has_finite_geometry(&self) -> bool {
        let finite = [self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite());
        finite && self.w > 0.0 && self.h > 0.0
    }

    fn is_accepted(&self, min_confidence: f64) -> bool {
        // NaN confidence never passes
        self.confidence >= min_confidence && self.has_finite_geometry()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub tables_added: usize,
    pub fixtures_added: usize,
    pub skipped: usize,
}

/// Add every candidate at or above `min_confidence` to the store.
///
/// Low-confidence and degenerate candidates are counted in `skipped`.
/// Positions are stored as detected; run validation afterwards to find
/// overlaps the detector produced.
pub fn import_scan(
    store: &mut LayoutStore,
    candidates: &[ScanCandidate],
    min_confidence: f64,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for candidate in candidates {
        if !candidate.is_accepted(min_confidence) {
            tracing::debug!(confidence = candidate.confidence, "Scan candidate skipped");
            summary.skipped += 1;
            continue;
        }

        match candidate.kind {
            CandidateKind::Table { shape, capacity } => {
                let mut create = TableCreate::at(candidate.x, candidate.y)
                    .with_shape(shape)
                    .with_size(candidate.w, candidate.h);
                create.capacity = capacity;
                store.add_table(create);
                summary.tables_added += 1;
            }
            CandidateKind::Fixture { kind } => {
                store.add_fixture(FixtureCreate {
                    kind,
                    x: candidate.x,
                    y: candidate.y,
                    w: candidate.w,
                    h: candidate.h,
                });
                summary.fixtures_added += 1;
            }
        }
    }

    tracing::info!(
        tables = summary.tables_added,
        fixtures = summary.fixtures_added,
        skipped = summary.skipped,
        "Scan imported"
    );
    summary
}
