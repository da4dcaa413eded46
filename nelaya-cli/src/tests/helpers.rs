//! Test helpers for laying out requests, snapshots and model artefacts.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{Value, json};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directories");
    }
    std::fs::write(path, contents).expect("write file");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).expect("valid date")
}

pub(super) fn noon(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, d, 12, 0, 0)
        .single()
        .expect("valid time")
}

/// Request for 1 March 2025 from an origin off Banda Aceh.
pub(super) fn request_json() -> Value {
    json!({
        "date": "2025-03-01",
        "mode": "optimal",
        "origin": {"id": "lampulo", "name": "Lampulo", "lat": 5.5, "lon": 95.2},
        "boat": {"speed_kmh": 20.0, "burn_lph": 10.0, "fuel_price": 10000.0},
        "constraints": {"max_radius_km": 50.0, "fgi_min": 0.5, "top_n": 3}
    })
}

fn point(lat: f64, score: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [95.2, lat]},
        "properties": {"score": score}
    })
}

/// Store a snapshot for `date` with three spots north of the origin.
pub(super) fn write_day_snapshot(snapshot_dir: &Utf8Path, date: NaiveDate) {
    let collection = json!({
        "type": "FeatureCollection",
        "features": [point(5.6, 0.9), point(5.7, 0.6), point(5.55, 0.2)]
    });
    nelaya_data::write_snapshot(snapshot_dir, date, &collection).expect("write snapshot");
}

/// Model whose output rises with water temperature above 28 degrees.
pub(super) fn model_json() -> Value {
    json!({
        "scaler": {"mean": [28.0, 33.0, 0.2], "scale": [1.0, 1.0, 0.1]},
        "hidden": {"weights": [[2.0, 0.0, 0.0], [-2.0, 0.0, 0.0]], "bias": [0.0, 0.0]},
        "output": {"weights": [1.5, -1.5], "bias": 0.0}
    })
}

pub(super) fn write_model(path: &Utf8Path) {
    write_utf8(path, model_json().to_string().as_bytes());
}

pub(super) fn cells_json() -> Value {
    json!([
        {"lat": 5.6, "lon": 95.1, "sst_c": 29.5, "sal_psu": 33.0, "chl_mg_m3": 0.2},
        {"lat": 5.7, "lon": 95.3, "sst_c": 26.0, "sal_psu": 33.0, "chl_mg_m3": 0.2}
    ])
}
