//! `ScoringService` backed by a [`ConditionsModel`].
#![forbid(unsafe_code)]

use camino::Utf8Path;
use nelaya_core::{Conditions, ScoringError, ScoringService, ScoringStatus};

use crate::{ConditionsModel, ModelError};

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Uninitialised,
    Ready(ConditionsModel),
    Unavailable,
}

/// Scores conditions with a loaded model.
///
/// A scorer starts [`ScoringStatus::Uninitialised`] and moves to `Ready` or
/// `Unavailable` once a load has been attempted. It holds no interior
/// mutability, so one instance can serve concurrent requests.
///
/// # Examples
///
/// ```
/// use nelaya_core::{ScoringService, ScoringStatus};
/// use nelaya_scorer::ModelScorer;
///
/// let scorer = ModelScorer::default();
/// assert_eq!(scorer.status(), ScoringStatus::Uninitialised);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelScorer {
    state: State,
}

impl ModelScorer {
    /// Wrap an already validated model.
    #[must_use]
    pub const fn from_model(model: ConditionsModel) -> Self {
        Self {
            state: State::Ready(model),
        }
    }

    /// Load the model at `path`, marking the scorer unavailable on failure.
    #[must_use]
    pub fn load(path: &Utf8Path) -> Self {
        match Self::try_load(path) {
            Ok(scorer) => scorer,
            Err(err) => {
                log::warn!("conditions model unavailable: {err}");
                Self {
                    state: State::Unavailable,
                }
            }
        }
    }

    /// Load the model at `path`.
    ///
    /// # Errors
    /// Returns [`ModelError`] when the artefact cannot be read or validated.
    pub fn try_load(path: &Utf8Path) -> Result<Self, ModelError> {
        let model = ConditionsModel::from_path(path)?;
        log::debug!(
            "loaded conditions model from {path} ({} hidden units)",
            model.hidden.weights.len()
        );
        Ok(Self::from_model(model))
    }

    /// Loaded model, when ready.
    #[must_use]
    pub const fn model(&self) -> Option<&ConditionsModel> {
        match &self.state {
            State::Ready(model) => Some(model),
            State::Uninitialised | State::Unavailable => None,
        }
    }
}

impl ScoringService for ModelScorer {
    fn status(&self) -> ScoringStatus {
        match self.state {
            State::Uninitialised => ScoringStatus::Uninitialised,
            State::Ready(_) => ScoringStatus::Ready,
            State::Unavailable => ScoringStatus::Unavailable,
        }
    }

    fn raw_score(&self, conditions: &Conditions) -> Result<f64, ScoringError> {
        let model = self.model().ok_or(ScoringError::Unavailable)?;
        let raw = model.predict(conditions.as_features());
        if raw.is_finite() {
            Ok(raw)
        } else {
            Err(ScoringError::NonFiniteOutput)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DenseLayer, OutputLayer, StandardScaler};
    use camino::Utf8PathBuf;
    use nelaya_core::{Band, score_conditions};
    use rstest::{fixture, rstest};

    #[fixture]
    fn model() -> ConditionsModel {
        ConditionsModel {
            scaler: StandardScaler {
                mean: vec![28.0, 33.0, 0.2],
                scale: vec![1.0, 1.0, 1.0],
            },
            hidden: DenseLayer {
                weights: vec![vec![1.0, 0.0, 0.0]],
                bias: vec![0.0],
            },
            output: OutputLayer {
                weights: vec![3.0],
                bias: -1.0,
            },
        }
    }

    #[rstest]
    fn ready_scorer_returns_raw_output(model: ConditionsModel) {
        let scorer = ModelScorer::from_model(model);
        assert_eq!(scorer.status(), ScoringStatus::Ready);
        let raw = scorer
            .raw_score(&Conditions::new(29.0, 33.0, 0.2))
            .expect("raw score");
        assert_eq!(raw, 2.0);
    }

    #[rstest]
    fn logit_output_is_calibrated(model: ConditionsModel) {
        let scorer = ModelScorer::from_model(model);
        let score = score_conditions(&scorer, &Conditions::new(29.0, 33.0, 0.2));
        assert_eq!(score.band, Band::High);
        assert!(score.probability.is_some_and(|p| p > 0.88 && p < 0.89));
    }

    #[rstest]
    fn uninitialised_scorer_refuses() {
        let scorer = ModelScorer::default();
        assert_eq!(
            scorer.raw_score(&Conditions::new(29.0, 33.0, 0.2)),
            Err(ScoringError::Unavailable)
        );
    }

    #[rstest]
    fn missing_artefact_marks_unavailable() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(temp.path().join("absent.json")).expect("utf8 path");

        let scorer = ModelScorer::load(&path);
        assert_eq!(scorer.status(), ScoringStatus::Unavailable);
        assert!(matches!(
            ModelScorer::try_load(&path),
            Err(ModelError::Read { .. })
        ));
        let score = score_conditions(&scorer, &Conditions::new(29.0, 33.0, 0.2));
        assert_eq!(score.band, Band::Unknown);
        assert!(score.probability.is_none());
    }
}
