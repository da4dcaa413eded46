//! In-memory collaborators used by unit, behaviour and doc tests.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;

use crate::snapshot::{SnapshotReference, SnapshotStore, snapshot_relative_path};
use crate::{Conditions, ScoringError, ScoringService, ScoringStatus};

/// `SnapshotStore` holding snapshot text in memory, keyed by the
/// date-derived relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    snapshots: HashMap<Utf8PathBuf, String>,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the snapshot for `date`, replacing any existing one.
    #[must_use]
    pub fn with_snapshot(mut self, date: NaiveDate, text: impl Into<String>) -> Self {
        self.insert(date, text);
        self
    }

    /// Add the snapshot for `date` in place.
    pub fn insert(&mut self, date: NaiveDate, text: impl Into<String>) {
        self.snapshots
            .insert(snapshot_relative_path(date), text.into());
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn snapshot_path(&self, date: NaiveDate) -> Utf8PathBuf {
        snapshot_relative_path(date)
    }

    fn has_snapshot(&self, path: &Utf8Path) -> bool {
        self.snapshots.contains_key(path)
    }

    fn read_snapshot(&self, reference: &SnapshotReference) -> std::io::Result<String> {
        self.snapshots
            .get(&reference.file_path)
            .cloned()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }
}

/// `ScoringService` that returns the same raw value for every input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScoringService(pub f64);

impl ScoringService for FixedScoringService {
    fn status(&self) -> ScoringStatus {
        ScoringStatus::Ready
    }

    fn raw_score(&self, _conditions: &Conditions) -> Result<f64, ScoringError> {
        Ok(self.0)
    }
}

/// `ScoringService` whose model never loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableScoringService;

impl ScoringService for UnavailableScoringService {
    fn status(&self) -> ScoringStatus {
        ScoringStatus::Unavailable
    }

    fn raw_score(&self, _conditions: &Conditions) -> Result<f64, ScoringError> {
        Err(ScoringError::Unavailable)
    }
}
