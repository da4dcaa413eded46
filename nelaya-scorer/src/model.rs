//! Standard scaler and one-hidden-layer ReLU network over ocean conditions.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Number of model inputs: temperature, salinity, chlorophyll.
pub const FEATURE_COUNT: usize = 3;

/// Per-feature standardisation `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Feature means.
    pub mean: Vec<f64>,
    /// Feature standard deviations. Zero entries leave the centred value
    /// unscaled.
    pub scale: Vec<f64>,
}

/// Fully connected layer with one weight row per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    /// `weights[unit][input]`.
    pub weights: Vec<Vec<f64>>,
    /// One bias per unit.
    pub bias: Vec<f64>,
}

/// Single-unit output layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputLayer {
    /// One weight per hidden unit.
    pub weights: Vec<f64>,
    /// Output bias.
    pub bias: f64,
}

/// Trained conditions model.
///
/// The output is a raw scalar; callers calibrate it with
/// [`nelaya_core::to_prob`].
///
/// # Examples
///
/// ```
/// use nelaya_scorer::ConditionsModel;
///
/// let model: ConditionsModel = serde_json::from_str(r#"{
///     "scaler": {"mean": [28.0, 33.0, 0.2], "scale": [1.0, 1.0, 0.1]},
///     "hidden": {"weights": [[1.0, 0.0, 0.0]], "bias": [0.0]},
///     "output": {"weights": [2.0], "bias": -1.0}
/// }"#).expect("valid model");
/// model.validate().expect("consistent shapes");
/// assert_eq!(model.predict([29.0, 33.0, 0.2]), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionsModel {
    /// Input standardisation.
    pub scaler: StandardScaler,
    /// Hidden ReLU layer.
    pub hidden: DenseLayer,
    /// Linear output layer.
    pub output: OutputLayer,
}

impl ConditionsModel {
    /// Read, parse and validate a model artefact.
    ///
    /// # Errors
    /// Returns [`ModelError`] when the file cannot be read, is not a model
    /// document, or has inconsistent shapes.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ModelError> {
        let text = nelaya_fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_str(&text).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Check that every component has matching dimensions and finite values.
    ///
    /// # Errors
    /// Returns [`ModelError::Shape`], [`ModelError::EmptyHiddenLayer`] or
    /// [`ModelError::NonFinite`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ModelError> {
        expect_len("scaler.mean", &self.scaler.mean, FEATURE_COUNT)?;
        expect_len("scaler.scale", &self.scaler.scale, FEATURE_COUNT)?;
        let units = self.hidden.weights.len();
        if units == 0 {
            return Err(ModelError::EmptyHiddenLayer);
        }
        expect_len("hidden.bias", &self.hidden.bias, units)?;
        for row in &self.hidden.weights {
            expect_len("hidden.weights row", row, FEATURE_COUNT)?;
        }
        expect_len("output.weights", &self.output.weights, units)?;
        if !self.output.bias.is_finite() {
            return Err(ModelError::NonFinite {
                component: "output.bias",
            });
        }
        Ok(())
    }

    /// Evaluate the network on raw, unscaled features.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "network evaluation is dot products and ReLU"
    )]
    pub fn predict(&self, features: [f64; FEATURE_COUNT]) -> f64 {
        let scaled = self.scaler.transform(features);
        let hidden = self
            .hidden
            .weights
            .iter()
            .zip(&self.hidden.bias)
            .map(|(row, bias)| (dot(row, &scaled) + bias).max(0.0));
        hidden
            .zip(&self.output.weights)
            .map(|(activation, weight)| activation * weight)
            .sum::<f64>()
            + self.output.bias
    }
}

impl StandardScaler {
    /// Standardise `features`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "standardisation is affine")]
    pub fn transform(&self, features: [f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scaled = features;
        for ((value, mean), scale) in scaled.iter_mut().zip(&self.mean).zip(&self.scale) {
            let divisor = if *scale == 0.0 { 1.0 } else { *scale };
            *value = (*value - mean) / divisor;
        }
        scaled
    }
}

#[expect(clippy::float_arithmetic, reason = "dot product")]
fn dot(weights: &[f64], inputs: &[f64]) -> f64 {
    weights.iter().zip(inputs).map(|(w, x)| w * x).sum()
}

fn expect_len(component: &'static str, values: &[f64], expected: usize) -> Result<(), ModelError> {
    if values.len() != expected {
        return Err(ModelError::Shape {
            component,
            expected,
            found: values.len(),
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NonFinite { component });
    }
    Ok(())
}
