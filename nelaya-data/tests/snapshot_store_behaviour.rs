//! Behaviour tests for snapshot persistence and resolution on disk.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use chrono::{Days, NaiveDate, TimeZone, Utc};
use nelaya_core::{
    Boat, Constraints, Mode, Origin, RecommendError, RecommendRequest, RecommendationResult,
    Recommender, SnapshotError, SnapshotReference, resolve_snapshot,
};
use nelaya_data::{FsSnapshotStore, write_snapshot};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use tempfile::TempDir;

fn requested_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
}

fn days_before(n: u64) -> NaiveDate {
    requested_day()
        .checked_sub_days(Days::new(n))
        .expect("date in range")
}

fn root(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 temp dir")
}

fn write_day(temp: &TempDir, date: NaiveDate, features: serde_json::Value) {
    let collection = json!({"type": "FeatureCollection", "features": features});
    write_snapshot(&root(temp), date, &collection).expect("write snapshot");
}

#[fixture]
fn temp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

#[fixture]
fn resolution() -> RefCell<Option<Result<SnapshotReference, SnapshotError>>> {
    RefCell::new(None)
}

#[fixture]
fn recommendation() -> RefCell<Option<Result<RecommendationResult, RecommendError>>> {
    RefCell::new(None)
}

#[given("snapshots written two and four days before the requested day")]
fn given_lagging(#[from(temp)] temp: &TempDir) {
    write_day(temp, days_before(2), json!([]));
    write_day(temp, days_before(4), json!([]));
}

#[given("a snapshot written for the requested day with a strong spot near the origin")]
fn given_strong_spot(#[from(temp)] temp: &TempDir) {
    write_day(
        temp,
        requested_day(),
        json!([{
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [95.25, 5.55]},
            "properties": {"id": "strong", "score": 0.91, "band": "High"},
        }]),
    );
}

#[when("I resolve the requested day with a 14 day window")]
fn when_resolve_wide(
    #[from(temp)] temp: &TempDir,
    #[from(resolution)] resolution: &RefCell<Option<Result<SnapshotReference, SnapshotError>>>,
) {
    let store = FsSnapshotStore::new(root(temp));
    *resolution.borrow_mut() = Some(resolve_snapshot(&store, requested_day(), 14));
}

#[when("I resolve the requested day with a 1 day window")]
fn when_resolve_narrow(
    #[from(temp)] temp: &TempDir,
    #[from(resolution)] resolution: &RefCell<Option<Result<SnapshotReference, SnapshotError>>>,
) {
    let store = FsSnapshotStore::new(root(temp));
    *resolution.borrow_mut() = Some(resolve_snapshot(&store, requested_day(), 1));
}

#[when("I request a recommendation from the filesystem store")]
fn when_recommend(
    #[from(temp)] temp: &TempDir,
    #[from(recommendation)] recommendation: &RefCell<
        Option<Result<RecommendationResult, RecommendError>>,
    >,
) {
    let request = RecommendRequest {
        date: Some(requested_day().to_string()),
        date_utc: None,
        mode: Mode::Optimal,
        origin: Origin::new(5.5, 95.2),
        boat: Boat {
            speed_kmh: 25.0,
            burn_lph: 12.0,
            fuel_price: 10_000.0,
        },
        constraints: Constraints::default(),
    };
    let now = Utc
        .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
        .single()
        .expect("valid time");
    let engine = Recommender::new(FsSnapshotStore::new(root(temp)));
    *recommendation.borrow_mut() = Some(engine.recommend_at(&request, now));
}

#[then("the snapshot from two days before is chosen")]
fn then_two_days_before(
    #[from(temp)] temp: &TempDir,
    #[from(resolution)] resolution: &RefCell<Option<Result<SnapshotReference, SnapshotError>>>,
) {
    let resolution = resolution.borrow();
    let reference = resolution
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .expect("snapshot resolved");
    assert_eq!(reference.date_used, days_before(2));
    assert!(reference.file_path.starts_with(root(temp)));
}

#[then("resolution fails")]
fn then_fails(
    #[from(resolution)] resolution: &RefCell<Option<Result<SnapshotReference, SnapshotError>>>,
) {
    let resolution = resolution.borrow();
    assert!(matches!(
        resolution.as_ref(),
        Some(Err(SnapshotError::NotFound { .. }))
    ));
}

#[then("the strong spot is recommended")]
fn then_recommended(
    #[from(recommendation)] recommendation: &RefCell<
        Option<Result<RecommendationResult, RecommendError>>,
    >,
) {
    let recommendation = recommendation.borrow();
    let result = recommendation
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .expect("recommendation");
    assert!(result.ok);
    let best = result.chosen_best.as_ref().expect("a best spot");
    assert_eq!(best.id.as_deref(), Some("strong"));
    assert!(best.fuel_cost_rp.is_some_and(|cost| cost > 0.0));
}

#[scenario(path = "tests/features/snapshot_store.feature", index = 0)]
fn lagging_pipeline_resolves(
    temp: TempDir,
    resolution: RefCell<Option<Result<SnapshotReference, SnapshotError>>>,
) {
    let _ = (temp, resolution);
}

#[scenario(path = "tests/features/snapshot_store.feature", index = 1)]
fn narrow_window_misses(
    temp: TempDir,
    resolution: RefCell<Option<Result<SnapshotReference, SnapshotError>>>,
) {
    let _ = (temp, resolution);
}

#[scenario(path = "tests/features/snapshot_store.feature", index = 2)]
fn recommendations_read_written_snapshots(
    temp: TempDir,
    recommendation: RefCell<Option<Result<RecommendationResult, RecommendError>>>,
) {
    let _ = (temp, recommendation);
}
