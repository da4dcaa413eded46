//! Locate the daily snapshot used for a request.
//!
//! Upstream pipelines can lag by several days, so [`resolve_snapshot`] walks
//! backwards from the requested day and settles on the most recent artefact
//! within a bounded window.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Days, NaiveDate};
use thiserror::Error;

mod layout;

pub use layout::{SNAPSHOT_EXTENSION, snapshot_file_name, snapshot_relative_path};

/// Default look-back window, in days.
pub const DEFAULT_MAX_BACK_DAYS: u16 = 14;

/// Read-only access to daily snapshot artefacts.
///
/// Locations are a pure function of the date; stores decide how a location
/// maps onto storage.
pub trait SnapshotStore {
    /// Location of the snapshot for `date`.
    fn snapshot_path(&self, date: NaiveDate) -> Utf8PathBuf;

    /// Report whether an artefact exists at `path`.
    fn has_snapshot(&self, path: &Utf8Path) -> bool;

    /// Read the artefact behind `reference` as UTF-8 text.
    fn read_snapshot(&self, reference: &SnapshotReference) -> std::io::Result<String>;
}

/// The snapshot chosen for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotReference {
    /// Day the snapshot covers; may precede the requested day.
    pub date_used: NaiveDate,
    /// Location reported by the store.
    pub file_path: Utf8PathBuf,
}

/// Errors raised while resolving a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// No artefact exists within the look-back window.
    #[error("no snapshot found for {requested} (searched back {max_back_days} days)")]
    NotFound {
        /// Day the caller asked for.
        requested: NaiveDate,
        /// Size of the window that was searched.
        max_back_days: u16,
    },
}

/// Return the most recent snapshot between `requested - max_back_days` and
/// `requested`, inclusive.
///
/// # Errors
///
/// Returns [`SnapshotError::NotFound`] when no day in the window has an
/// artefact.
pub fn resolve_snapshot<S>(
    store: &S,
    requested: NaiveDate,
    max_back_days: u16,
) -> Result<SnapshotReference, SnapshotError>
where
    S: SnapshotStore + ?Sized,
{
    let found = (0..=u64::from(max_back_days))
        .map_while(|k| requested.checked_sub_days(Days::new(k)))
        .find_map(|date| {
            let file_path = store.snapshot_path(date);
            store.has_snapshot(&file_path).then_some(SnapshotReference {
                date_used: date,
                file_path,
            })
        });

    match found {
        Some(reference) => {
            log::debug!(
                "resolved snapshot for {requested} to {} ({})",
                reference.date_used,
                reference.file_path
            );
            Ok(reference)
        }
        None => Err(SnapshotError::NotFound {
            requested,
            max_back_days,
        }),
    }
}
