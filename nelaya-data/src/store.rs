//! Directory-backed snapshot store.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use nelaya_core::snapshot::snapshot_relative_path;
use nelaya_core::{SnapshotReference, SnapshotStore};

/// Snapshot root used when none is configured.
pub const DEFAULT_SNAPSHOT_DIR: &str = "data/fgi_daily";

/// Reads snapshots laid out as `<root>/YYYY/MM/fgi_map_YYYY-MM-DD.geojson`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use nelaya_core::SnapshotStore;
/// use nelaya_data::FsSnapshotStore;
///
/// let store = FsSnapshotStore::new("data/fgi_daily");
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
/// assert_eq!(
///     store.snapshot_path(date).as_str(),
///     "data/fgi_daily/2025/03/fgi_map_2025-03-01.geojson",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsSnapshotStore {
    root: Utf8PathBuf,
}

impl FsSnapshotStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the year partitions.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl Default for FsSnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_DIR)
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn snapshot_path(&self, date: NaiveDate) -> Utf8PathBuf {
        self.root.join(snapshot_relative_path(date))
    }

    fn has_snapshot(&self, path: &Utf8Path) -> bool {
        match nelaya_fs::is_regular_file(path) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("treating {path} as absent: {err}");
                false
            }
        }
    }

    fn read_snapshot(&self, reference: &SnapshotReference) -> std::io::Result<String> {
        nelaya_fs::read_to_string(&reference.file_path)
    }
}
