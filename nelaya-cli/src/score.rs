//! Score command implementation for the Nelaya CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use nelaya_core::{Band, Conditions, ScoringService, ScoringStatus, score_conditions};
use nelaya_scorer::ModelScorer;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CHL, ARG_MODEL, ARG_SAL, ARG_TEMP, CliError, DEFAULT_MODEL_PATH, ENV_SCORE_CHL,
    ENV_SCORE_SAL, ENV_SCORE_TEMP, Outcome, write_json,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score one set of surface readings with the conditions \
                 model. When the model cannot be loaded the score is null \
                 and the category is Unknown.",
    about = "Score ocean readings"
)]
#[ortho_config(prefix = "NELAYA")]
pub(crate) struct ScoreArgs {
    /// Sea surface temperature in degrees Celsius.
    #[arg(long = ARG_TEMP, value_name = "celsius", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) temp: Option<f64>,
    /// Salinity in PSU.
    #[arg(long = ARG_SAL, value_name = "psu", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) sal: Option<f64>,
    /// Chlorophyll-a in mg/m3.
    #[arg(long = ARG_CHL, value_name = "mg_m3", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) chl: Option<f64>,
    /// Path to the conditions model artefact.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoreConfig {
    pub(crate) conditions: Conditions,
    pub(crate) model: Utf8PathBuf,
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let temp = args.temp.ok_or(CliError::MissingArgument {
            field: ARG_TEMP,
            env: ENV_SCORE_TEMP,
        })?;
        let sal = args.sal.ok_or(CliError::MissingArgument {
            field: ARG_SAL,
            env: ENV_SCORE_SAL,
        })?;
        let chl = args.chl.ok_or(CliError::MissingArgument {
            field: ARG_CHL,
            env: ENV_SCORE_CHL,
        })?;
        Ok(Self {
            conditions: Conditions::new(temp, sal, chl),
            model: args
                .model
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_MODEL_PATH)),
        })
    }
}

/// JSON printed by `nelaya score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScoreOutput {
    pub(crate) fgi_score: Option<f64>,
    pub(crate) category: Band,
    pub(crate) raw: Option<f64>,
    pub(crate) model_status: ScoringStatus,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<Outcome, CliError> {
    let mut stdout = std::io::stdout().lock();
    run_score_with(args, &mut stdout)
}

pub(crate) fn run_score_with(args: ScoreArgs, writer: &mut dyn Write) -> Result<Outcome, CliError> {
    let config = args.into_config()?;
    execute_score(&config, writer)
}

pub(crate) fn execute_score(config: &ScoreConfig, writer: &mut dyn Write) -> Result<Outcome, CliError> {
    if let Err(err) = config.conditions.validate() {
        write_json(writer, &err.to_body())?;
        return Ok(Outcome::Rejected);
    }
    let scorer = ModelScorer::load(&config.model);
    let score = score_conditions(&scorer, &config.conditions);
    let output = ScoreOutput {
        fgi_score: score.probability,
        category: score.band,
        raw: score.raw,
        model_status: scorer.status(),
    };
    write_json(writer, &output)?;
    Ok(Outcome::Completed)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
