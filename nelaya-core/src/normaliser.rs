//! Calibration of raw model outputs into FGI probabilities and bands.
//!
//! Every consumer of a raw score goes through [`to_prob`] and [`to_band`];
//! the band thresholds are `0.50` and `0.75`.

use crate::Band;

/// Probability at or above which a spot is [`Band::High`].
pub const HIGH_THRESHOLD: f64 = 0.75;

/// Probability at or above which a spot is [`Band::Medium`].
pub const MEDIUM_THRESHOLD: f64 = 0.50;

/// Map a raw scalar into a probability in `0.0..=1.0`.
///
/// Values already inside the unit interval are returned unchanged. Anything
/// outside it is treated as a logit and passed through the logistic
/// function. `NaN` maps to `0.0`.
///
/// # Examples
/// ```
/// use nelaya_core::to_prob;
///
/// assert_eq!(to_prob(0.42), 0.42);
/// assert!((to_prob(-2.0) - 0.119_202_922).abs() < 1e-9);
/// ```
pub fn to_prob(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let probability = if (0.0..=1.0).contains(&raw) {
        raw
    } else {
        sigmoid(raw)
    };
    probability.clamp(0.0, 1.0)
}

/// Classify a calibrated probability.
///
/// # Examples
/// ```
/// use nelaya_core::{Band, to_band};
///
/// assert_eq!(to_band(0.8), Band::High);
/// assert_eq!(to_band(0.6), Band::Medium);
/// assert_eq!(to_band(0.1), Band::Low);
/// ```
pub fn to_band(probability: f64) -> Band {
    if probability >= HIGH_THRESHOLD {
        Band::High
    } else if probability >= MEDIUM_THRESHOLD {
        Band::Medium
    } else {
        Band::Low
    }
}

/// Logistic function `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
