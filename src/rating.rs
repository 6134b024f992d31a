//! Qualitative ratings for calculator outputs.
//!
//! Presentation-only classifiers: they color and label results, they never
//! feed back into a calculation.

use serde::{Deserialize, Serialize};

/// How a campaign's expected ROAS reads to an investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoasRating {
    Excellent, // >= 3x
    Good,      // >= 2.5x
    Moderate,  // >= 2x
    Low,
}

impl RoasRating {
    /// Classify a ROAS multiplier.
    pub fn from_roas(roas: f64) -> Self {
        if roas >= 3.0 {
            Self::Excellent
        } else if roas >= 2.5 {
            Self::Good
        } else if roas >= 2.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }
}

/// How hard a required sample size is to reach with typical mail volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleSizeRating {
    Easy,        // <= 5,000 per variation
    Moderate,    // <= 15,000
    Challenging, // <= 30,000
    Difficult,
}

impl SampleSizeRating {
    /// Classify a per-variation sample size.
    ///
    /// An infinite sample size (undetectable effect) classifies `Difficult`.
    pub fn from_sample_size(sample_size: f64) -> Self {
        if sample_size <= 5_000.0 {
            Self::Easy
        } else if sample_size <= 15_000.0 {
            Self::Moderate
        } else if sample_size <= 30_000.0 {
            Self::Challenging
        } else {
            Self::Difficult
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Challenging => "Challenging",
            Self::Difficult => "Difficult",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Easy => "Achievable in 1-2 mailings",
            Self::Moderate => "Typical for monthly campaigns",
            Self::Challenging => "May require 2-3 months of mailings",
            Self::Difficult => "Consider increasing MDE or combining with other data",
        }
    }
}
