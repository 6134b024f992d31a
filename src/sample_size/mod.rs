//! A/B test sample-size engine for mail campaigns.
//!
//! Computes the pieces required per variation to detect a relative lift in
//! response rate, using the two-proportion test with pooled variance under
//! the null and separate variances under the alternative:
//!
//! ```text
//! n = ceil((z_a * sqrt(2 * pbar * (1 - pbar)) + z_b * sqrt(p1(1-p1) + p2(1-p2)))^2 / (p2 - p1)^2)
//! ```
//!
//! A zero absolute effect yields `f64::INFINITY`; there is no amount of
//! mail that detects no difference. The formatting layer renders that as a
//! placeholder instead of a number.

pub mod sensitivity;

use serde::{Deserialize, Serialize};

pub use sensitivity::{
    generate_mde_sensitivity_table, MdeSensitivityRow, MDE_MATCH_TOLERANCE,
    MDE_SENSITIVITY_VALUES,
};

use crate::errors::ValidationError;

/// Statistical significance level (confidence) for the test.
///
/// Carries the two-tailed z-score for its alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Significance {
    /// 90% confidence (alpha 0.10).
    Ninety,
    /// 95% confidence (alpha 0.05), the A/B-testing standard.
    NinetyFive,
    /// 99% confidence (alpha 0.01).
    NinetyNine,
}

impl Significance {
    /// Resolve a raw level like 0.95 to a known significance.
    pub fn from_level(level: f64) -> Option<Self> {
        [Self::Ninety, Self::NinetyFive, Self::NinetyNine]
            .into_iter()
            .find(|s| (s.level() - level).abs() < 1e-9)
    }

    /// Resolve a raw level, falling back to 95% for unknown values.
    ///
    /// The fallback matches the original calculator behavior; it is logged
    /// so a caller mistake does not pass entirely unnoticed.
    pub fn from_level_or_default(level: f64) -> Self {
        Self::from_level(level).unwrap_or_else(|| {
            log::warn!("unrecognized significance level {level}, using 0.95");
            Self::NinetyFive
        })
    }

    pub fn level(&self) -> f64 {
        match self {
            Self::Ninety => 0.90,
            Self::NinetyFive => 0.95,
            Self::NinetyNine => 0.99,
        }
    }

    /// Two-tailed z-score for this significance level.
    pub fn z_alpha(&self) -> f64 {
        match self {
            Self::Ninety => 1.645,
            Self::NinetyFive => 1.96,
            Self::NinetyNine => 2.576,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ninety => "90%",
            Self::NinetyFive => "95%",
            Self::NinetyNine => "99%",
        }
    }
}

/// Statistical power (probability of detecting a real effect).
///
/// Carries the one-tailed z-score for its beta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Power {
    /// 80% power, the industry standard.
    Eighty,
    /// 85% power.
    EightyFive,
    /// 90% power.
    Ninety,
}

impl Power {
    /// Resolve a raw level like 0.80 to a known power.
    pub fn from_level(level: f64) -> Option<Self> {
        [Self::Eighty, Self::EightyFive, Self::Ninety]
            .into_iter()
            .find(|p| (p.level() - level).abs() < 1e-9)
    }

    /// Resolve a raw level, falling back to 80% for unknown values.
    pub fn from_level_or_default(level: f64) -> Self {
        Self::from_level(level).unwrap_or_else(|| {
            log::warn!("unrecognized power level {level}, using 0.80");
            Self::Eighty
        })
    }

    pub fn level(&self) -> f64 {
        match self {
            Self::Eighty => 0.80,
            Self::EightyFive => 0.85,
            Self::Ninety => 0.90,
        }
    }

    /// One-tailed z-score for this power level.
    pub fn z_beta(&self) -> f64 {
        match self {
            Self::Eighty => 0.8416,
            Self::EightyFive => 1.0364,
            Self::Ninety => 1.2816,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Eighty => "80%",
            Self::EightyFive => "85%",
            Self::Ninety => "90%",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Eighty => "Industry standard",
            Self::EightyFive => "Higher confidence",
            Self::Ninety => "Maximum confidence",
        }
    }
}

/// Inputs to a sample-size calculation.
///
/// `significance` and `power` are raw levels (0.95, 0.80) rather than the
/// enums so that serialized inputs round-trip the way the calculator UI
/// produces them; unknown levels resolve to the defaults with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeInputs {
    /// Baseline (control) response rate, e.g. 0.005 for 0.5%.
    pub baseline_rate: f64,
    /// Minimum detectable effect as a relative lift, e.g. 0.20 for +20%.
    pub mde: f64,
    /// Significance level: 0.90, 0.95, or 0.99.
    pub significance: f64,
    /// Power level: 0.80, 0.85, or 0.90.
    pub power: f64,
    /// Cost per mail piece in dollars.
    pub cost_per_piece: f64,
}

impl Default for SampleSizeInputs {
    /// Typical direct-mail campaign inputs.
    fn default() -> Self {
        Self {
            baseline_rate: 0.005,
            mde: 0.20,
            significance: 0.95,
            power: 0.80,
            cost_per_piece: 0.63,
        }
    }
}

impl SampleSizeInputs {
    /// Check that the inputs are in testable ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_rate("baseline_rate", self.baseline_rate)?;
        if !self.mde.is_finite() {
            return Err(ValidationError::NonFinite { field: "mde" });
        }
        if self.mde <= 0.0 {
            return Err(ValidationError::NonPositiveMde { value: self.mde });
        }
        ValidationError::check_amount("cost_per_piece", self.cost_per_piece)?;
        Ok(())
    }
}

/// Results derived from one sample-size calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSizeResults {
    /// Pieces required per variation; `f64::INFINITY` for a zero effect.
    pub sample_size_per_variation: f64,
    /// Pieces across both arms of the test.
    pub total_mail_pieces: f64,
    pub estimated_cost: f64,
    /// Response rate the variation is expected to achieve (p2).
    pub expected_variation_rate: f64,
    /// Absolute difference between variation and baseline rates.
    pub absolute_effect: f64,
}

/// Required sample size per variation, rounded up to whole pieces.
///
/// Returns `f64::INFINITY` when the relative lift produces no absolute
/// effect.
pub fn sample_size_per_variation(
    baseline_rate: f64,
    mde: f64,
    significance: f64,
    power: f64,
) -> f64 {
    let z_alpha = Significance::from_level_or_default(significance).z_alpha();
    let z_beta = Power::from_level_or_default(power).z_beta();

    let p1 = baseline_rate;
    let p2 = baseline_rate * (1.0 + mde);
    let absolute_effect = p2 - p1;

    if absolute_effect == 0.0 {
        return f64::INFINITY;
    }

    let p_bar = (p1 + p2) / 2.0;
    let variance_null = 2.0 * p_bar * (1.0 - p_bar);
    let variance_alt = p1 * (1.0 - p1) + p2 * (1.0 - p2);

    let numerator = (z_alpha * variance_null.sqrt() + z_beta * variance_alt.sqrt()).powi(2);
    (numerator / absolute_effect.powi(2)).ceil()
}

/// Compute the full result set for one set of inputs.
pub fn calculate_all_results(inputs: &SampleSizeInputs) -> SampleSizeResults {
    let SampleSizeInputs {
        baseline_rate,
        mde,
        significance,
        power,
        cost_per_piece,
    } = *inputs;

    let per_variation = sample_size_per_variation(baseline_rate, mde, significance, power);
    let total_mail_pieces = per_variation * 2.0;
    let expected_variation_rate = baseline_rate * (1.0 + mde);

    SampleSizeResults {
        sample_size_per_variation: per_variation,
        total_mail_pieces,
        estimated_cost: total_mail_pieces * cost_per_piece,
        expected_variation_rate,
        absolute_effect: expected_variation_rate - baseline_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs_pin_known_sample_size() {
        // 0.5% baseline, +20% relative lift, 95%/80%
        let n = sample_size_per_variation(0.005, 0.20, 0.95, 0.80);
        assert_eq!(n, 85_863.0);
    }

    #[test]
    fn test_calculate_all_results_with_defaults() {
        let results = calculate_all_results(&SampleSizeInputs::default());
        assert_eq!(results.sample_size_per_variation, 85_863.0);
        assert_eq!(results.total_mail_pieces, 171_726.0);
        assert!((results.estimated_cost - 108_187.38).abs() < 1e-6);
        assert!((results.expected_variation_rate - 0.006).abs() < 1e-12);
        assert!((results.absolute_effect - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_zero_mde_yields_infinite_sample() {
        let results = calculate_all_results(&SampleSizeInputs {
            mde: 0.0,
            ..SampleSizeInputs::default()
        });
        assert!(results.sample_size_per_variation.is_infinite());
        assert!(results.total_mail_pieces.is_infinite());
        assert!(results.estimated_cost.is_infinite());
    }

    #[test]
    fn test_zero_baseline_yields_infinite_sample() {
        // p2 = 0 * 1.2 = 0, so the absolute effect vanishes
        let n = sample_size_per_variation(0.0, 0.20, 0.95, 0.80);
        assert!(n.is_infinite());
    }

    #[test]
    fn test_higher_significance_needs_more_mail() {
        assert_eq!(sample_size_per_variation(0.005, 0.20, 0.90, 0.80), 67_640.0);
        assert_eq!(
            sample_size_per_variation(0.005, 0.20, 0.99, 0.80),
            127_772.0
        );
    }

    #[test]
    fn test_higher_power_needs_more_mail() {
        assert_eq!(sample_size_per_variation(0.005, 0.20, 0.95, 0.85), 98_218.0);
        assert_eq!(
            sample_size_per_variation(0.005, 0.20, 0.95, 0.90),
            114_950.0
        );
    }

    #[test]
    fn test_unknown_levels_fall_back_to_defaults() {
        let with_defaults = sample_size_per_variation(0.005, 0.20, 0.95, 0.80);
        // 0.97 significance and 0.75 power are not in the lookup tables
        assert_eq!(
            sample_size_per_variation(0.005, 0.20, 0.97, 0.80),
            with_defaults
        );
        assert_eq!(
            sample_size_per_variation(0.005, 0.20, 0.95, 0.75),
            with_defaults
        );
    }

    #[test]
    fn test_significance_resolution() {
        assert_eq!(Significance::from_level(0.95), Some(Significance::NinetyFive));
        assert_eq!(Significance::from_level(0.97), None);
        assert_eq!(
            Significance::from_level_or_default(0.5),
            Significance::NinetyFive
        );
        assert_eq!(Significance::NinetyNine.z_alpha(), 2.576);
    }

    #[test]
    fn test_power_resolution() {
        assert_eq!(Power::from_level(0.85), Some(Power::EightyFive));
        assert_eq!(Power::from_level(0.42), None);
        assert_eq!(Power::from_level_or_default(0.42), Power::Eighty);
        assert_eq!(Power::Ninety.z_beta(), 1.2816);
        assert_eq!(Power::Eighty.description(), "Industry standard");
    }

    #[test]
    fn test_validate_rejects_zero_mde() {
        let inputs = SampleSizeInputs {
            mde: 0.0,
            ..SampleSizeInputs::default()
        };
        assert!(inputs.validate().is_err());
        assert!(SampleSizeInputs::default().validate().is_ok());
    }
}
