//! Recommend command implementation for the Nelaya CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use nelaya_core::snapshot::DEFAULT_MAX_BACK_DAYS;
use nelaya_core::{RecommendRequest, Recommender, RecommenderConfig};
use nelaya_data::{DEFAULT_SNAPSHOT_DIR, FsSnapshotStore};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{load_json, require_existing};
use crate::{ARG_MAX_BACK_DAYS, ARG_REQUEST, ARG_SNAPSHOT_DIR, CliError, ENV_RECOMMEND_REQUEST};
use crate::{Outcome, write_json};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recommend fishing grounds for one vessel and origin. The \
                 request is a JSON document with date, mode, origin, boat and \
                 constraints; the newest snapshot within the look-back window \
                 is used.",
    about = "Recommend fishing grounds for a request"
)]
#[ortho_config(prefix = "NELAYA")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing a recommendation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Root of the daily snapshot tree.
    #[arg(long = ARG_SNAPSHOT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) snapshot_dir: Option<Utf8PathBuf>,
    /// How many days before the requested date to search for a snapshot.
    #[arg(long = ARG_MAX_BACK_DAYS, value_name = "days")]
    #[serde(default)]
    pub(crate) max_back_days: Option<u16>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) snapshot_dir: Utf8PathBuf,
    pub(crate) max_back_days: u16,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingPositional {
            field: ARG_REQUEST,
            env: ENV_RECOMMEND_REQUEST,
        })?;
        Ok(Self {
            request_path,
            snapshot_dir: args
                .snapshot_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_SNAPSHOT_DIR)),
            max_back_days: args.max_back_days.unwrap_or(DEFAULT_MAX_BACK_DAYS),
        })
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<Outcome, CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, Utc::now(), &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<Outcome, CliError> {
    let config = args.into_config()?;
    execute_recommend(&config, now, writer)
}

pub(crate) fn execute_recommend(
    config: &RecommendConfig,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<Outcome, CliError> {
    require_existing(&config.request_path, ARG_REQUEST)?;
    let request: RecommendRequest = load_json(&config.request_path, ARG_REQUEST)?;
    let recommender = Recommender::with_config(
        FsSnapshotStore::new(config.snapshot_dir.clone()),
        RecommenderConfig {
            max_back_days: config.max_back_days,
        },
    );
    match recommender.recommend_at(&request, now) {
        Ok(result) => {
            write_json(writer, &result)?;
            Ok(Outcome::Completed)
        }
        Err(err) => {
            write_json(writer, &err.to_body())?;
            Ok(Outcome::Rejected)
        }
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
