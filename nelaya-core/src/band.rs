//! Qualitative suitability bands derived from FGI probabilities.
//!
//! # Examples
//! ```
//! use nelaya_core::Band;
//!
//! assert_eq!(Band::High.as_str(), "High");
//! assert_eq!("medium".parse::<Band>(), Ok(Band::Medium));
//! ```

use serde::{Deserialize, Serialize};

/// Tier of a spot's fishing-ground suitability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Band {
    /// Probability below `0.50`.
    Low,
    /// Probability in `0.50..0.75`.
    Medium,
    /// Probability of at least `0.75`.
    High,
    /// No calibrated probability was available.
    #[default]
    Unknown,
}

impl Band {
    /// Return the band label as written in snapshots and responses.
    ///
    /// # Examples
    /// ```
    /// use nelaya_core::Band;
    ///
    /// assert_eq!(Band::Unknown.as_str(), "Unknown");
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a snapshot label, mapping anything unrecognised to
    /// [`Band::Unknown`].
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("unknown band '{s}'")),
        }
    }
}
