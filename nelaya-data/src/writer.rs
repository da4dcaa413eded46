//! Persist daily snapshots at their date-derived location.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use nelaya_core::snapshot::snapshot_relative_path;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while writing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotWriteError {
    /// The snapshot could not be encoded as JSON.
    #[error("failed to encode snapshot for {date}")]
    Encode {
        /// Day of the snapshot.
        date: NaiveDate,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the file or creating its directories failed.
    #[error("failed to write snapshot to {path}")]
    Write {
        /// Target file.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
}

/// Write `snapshot` for `date` under `root` and return the file path.
///
/// Parent directories are created as needed and an existing snapshot for
/// the same day is replaced.
///
/// # Errors
///
/// Returns [`SnapshotWriteError`] when encoding or writing fails.
pub fn write_snapshot<T>(
    root: &Utf8Path,
    date: NaiveDate,
    snapshot: &T,
) -> Result<Utf8PathBuf, SnapshotWriteError>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(snapshot)
        .map_err(|source| SnapshotWriteError::Encode { date, source })?;
    let path = root.join(snapshot_relative_path(date));
    nelaya_fs::write_replacing(&path, &bytes).map_err(|source| SnapshotWriteError::Write {
        path: path.clone(),
        source,
    })?;
    log::info!("wrote snapshot for {date} to {path} ({} bytes)", bytes.len());
    Ok(path)
}
