//! Filesystem storage for daily FGI snapshots.
//!
//! Responsibilities:
//! - Implement [`SnapshotStore`](nelaya_core::SnapshotStore) over a
//!   directory tree partitioned by year and month.
//! - Persist snapshots produced by the daily build job.
//!
//! Boundaries:
//! - Do not encode ranking or filtering rules (live in `nelaya-core`).
//! - Do not cache artefacts between requests.
//!
//! Invariants:
//! - Snapshot locations are a pure function of the date.
//! - Writes replace a snapshot in one rename so readers never see a
//!   partial file.

mod store;
mod writer;

pub use store::{DEFAULT_SNAPSHOT_DIR, FsSnapshotStore};
pub use writer::{SnapshotWriteError, write_snapshot};
