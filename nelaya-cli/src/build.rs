//! Build-snapshot command implementation for the Nelaya CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Parser;
use nelaya_core::parse_date;
use nelaya_data::{DEFAULT_SNAPSHOT_DIR, write_snapshot};
use nelaya_scorer::{GridCell, ModelScorer, build_snapshot};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{load_json, require_existing};
use crate::{
    ARG_CELLS, ARG_DATE, ARG_MODEL, ARG_SNAPSHOT_DIR, CliError, DEFAULT_MODEL_PATH,
    ENV_BUILD_CELLS, ENV_BUILD_DATE, Outcome, write_json,
};

/// CLI arguments for the `build-snapshot` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score decoded grid cells with the conditions model and \
                 store the day's GeoJSON snapshot under the snapshot tree. \
                 Cells are a JSON array of {lat, lon, sst_c, sal_psu, \
                 chl_mg_m3} objects.",
    about = "Build the daily FGI snapshot"
)]
#[ortho_config(prefix = "NELAYA")]
pub(crate) struct BuildSnapshotArgs {
    /// Path to a JSON array of decoded grid cells.
    #[arg(long = ARG_CELLS, value_name = "path")]
    #[serde(default)]
    pub(crate) cells: Option<Utf8PathBuf>,
    /// Day the readings apply to (`YYYY-MM-DD`).
    #[arg(long = ARG_DATE, value_name = "date")]
    #[serde(default)]
    pub(crate) date: Option<String>,
    /// Path to the conditions model artefact.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Root of the daily snapshot tree.
    #[arg(long = ARG_SNAPSHOT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) snapshot_dir: Option<Utf8PathBuf>,
}

impl BuildSnapshotArgs {
    pub(crate) fn into_config(self) -> Result<BuildSnapshotConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BuildSnapshotConfig::try_from(merged)
    }
}

/// Resolved `build-snapshot` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildSnapshotConfig {
    pub(crate) cells: Utf8PathBuf,
    pub(crate) date: NaiveDate,
    pub(crate) model: Utf8PathBuf,
    pub(crate) snapshot_dir: Utf8PathBuf,
}

impl TryFrom<BuildSnapshotArgs> for BuildSnapshotConfig {
    type Error = CliError;

    fn try_from(args: BuildSnapshotArgs) -> Result<Self, Self::Error> {
        let cells = args.cells.ok_or(CliError::MissingArgument {
            field: ARG_CELLS,
            env: ENV_BUILD_CELLS,
        })?;
        let raw_date = args.date.ok_or(CliError::MissingArgument {
            field: ARG_DATE,
            env: ENV_BUILD_DATE,
        })?;
        Ok(Self {
            cells,
            date: parse_date(&raw_date)?,
            model: args
                .model
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_MODEL_PATH)),
            snapshot_dir: args
                .snapshot_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_SNAPSHOT_DIR)),
        })
    }
}

/// JSON printed by `nelaya build-snapshot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct BuildSummary {
    pub(crate) path: Utf8PathBuf,
    pub(crate) date: NaiveDate,
    pub(crate) count: usize,
}

pub(crate) fn run_build_snapshot(args: BuildSnapshotArgs) -> Result<Outcome, CliError> {
    let mut stdout = std::io::stdout().lock();
    run_build_snapshot_with(args, &mut stdout)
}

pub(crate) fn run_build_snapshot_with(
    args: BuildSnapshotArgs,
    writer: &mut dyn Write,
) -> Result<Outcome, CliError> {
    let config = args.into_config()?;
    execute_build_snapshot(&config, writer)
}

pub(crate) fn execute_build_snapshot(
    config: &BuildSnapshotConfig,
    writer: &mut dyn Write,
) -> Result<Outcome, CliError> {
    require_existing(&config.cells, ARG_CELLS)?;
    let cells: Vec<GridCell> = load_json(&config.cells, ARG_CELLS)?;
    let scorer = ModelScorer::try_load(&config.model).map_err(|source| {
        CliError::LoadModel {
            path: config.model.clone(),
            source,
        }
    })?;
    let snapshot = build_snapshot(config.date, &cells, &scorer)?;
    let path = write_snapshot(&config.snapshot_dir, config.date, &snapshot)?;
    let summary = BuildSummary {
        path,
        date: config.date,
        count: snapshot.meta.count,
    };
    write_json(writer, &summary)?;
    Ok(Outcome::Completed)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<BuildSnapshotConfig, CliError> {
    let merged = BuildSnapshotArgs::merge_from_layers(layers).map_err(CliError::from)?;
    BuildSnapshotConfig::try_from(merged)
}
