//! Date-derived snapshot locations.

use camino::Utf8PathBuf;
use chrono::{Datelike, NaiveDate};

/// File extension of daily snapshot artefacts.
pub const SNAPSHOT_EXTENSION: &str = "geojson";

/// File name of the snapshot for `date`, e.g. `fgi_map_2025-03-01.geojson`.
pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!("fgi_map_{}.{SNAPSHOT_EXTENSION}", date.format("%Y-%m-%d"))
}

/// Location of the snapshot for `date` relative to a snapshot root.
///
/// Snapshots are partitioned by year and month.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use nelaya_core::snapshot::snapshot_relative_path;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
/// assert_eq!(
///     snapshot_relative_path(date).as_str(),
///     "2025/03/fgi_map_2025-03-01.geojson",
/// );
/// ```
pub fn snapshot_relative_path(date: NaiveDate) -> Utf8PathBuf {
    let mut path = Utf8PathBuf::from(format!("{:04}", date.year()));
    path.push(format!("{:02}", date.month()));
    path.push(snapshot_file_name(date));
    path
}
