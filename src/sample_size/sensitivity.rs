//! MDE sensitivity table.
//!
//! Recomputes the full sample-size calculation for a fixed set of candidate
//! MDEs, holding baseline rate, significance, and power constant. Shows the
//! cost of ambition: halving the detectable lift roughly quadruples the mail.

use serde::Serialize;

use super::{sample_size_per_variation, SampleSizeInputs};

/// Candidate relative lifts for the sensitivity table.
pub const MDE_SENSITIVITY_VALUES: [f64; 5] = [0.10, 0.15, 0.20, 0.25, 0.30];

/// Tolerance for matching the selected MDE against a candidate.
pub const MDE_MATCH_TOLERANCE: f64 = 0.001;

/// One candidate MDE with its sample-size consequences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MdeSensitivityRow {
    /// Relative lift this row was computed for.
    pub mde: f64,
    pub sample_size_per_variation: f64,
    pub total_mail_pieces: f64,
    pub estimated_cost: f64,
    /// Whether this row matches the currently selected MDE.
    pub is_selected: bool,
}

/// Recompute the sample size for each candidate MDE.
///
/// `selected_mde` marks at most one row `is_selected` (tolerance
/// [`MDE_MATCH_TOLERANCE`]); a selection between candidates marks none.
pub fn generate_mde_sensitivity_table(
    inputs: &SampleSizeInputs,
    selected_mde: f64,
) -> Vec<MdeSensitivityRow> {
    MDE_SENSITIVITY_VALUES
        .iter()
        .map(|&mde| {
            let per_variation = sample_size_per_variation(
                inputs.baseline_rate,
                mde,
                inputs.significance,
                inputs.power,
            );
            let total_mail_pieces = per_variation * 2.0;

            MdeSensitivityRow {
                mde,
                sample_size_per_variation: per_variation,
                total_mail_pieces,
                estimated_cost: total_mail_pieces * inputs.cost_per_piece,
                is_selected: (mde - selected_mde).abs() < MDE_MATCH_TOLERANCE,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_pins_known_values_at_defaults() {
        let table = generate_mde_sensitivity_table(&SampleSizeInputs::default(), 0.20);
        let per_variation: Vec<f64> = table.iter().map(|r| r.sample_size_per_variation).collect();
        assert_eq!(
            per_variation,
            vec![327_925.0, 149_195.0, 85_863.0, 56_194.0, 39_886.0]
        );
    }

    #[test]
    fn test_smaller_mde_needs_more_mail() {
        let table = generate_mde_sensitivity_table(&SampleSizeInputs::default(), 0.20);
        for pair in table.windows(2) {
            assert!(pair[0].sample_size_per_variation > pair[1].sample_size_per_variation);
        }
    }

    #[test]
    fn test_exactly_one_row_selected_for_candidate_mde() {
        let table = generate_mde_sensitivity_table(&SampleSizeInputs::default(), 0.20);
        let selected: Vec<f64> = table
            .iter()
            .filter(|r| r.is_selected)
            .map(|r| r.mde)
            .collect();
        assert_eq!(selected, vec![0.20]);
    }

    #[test]
    fn test_selection_tolerates_float_noise() {
        let table = generate_mde_sensitivity_table(&SampleSizeInputs::default(), 0.2004);
        assert_eq!(table.iter().filter(|r| r.is_selected).count(), 1);
        assert!(table[2].is_selected);
    }

    #[test]
    fn test_no_row_selected_for_off_candidate_mde() {
        let table = generate_mde_sensitivity_table(&SampleSizeInputs::default(), 0.17);
        assert_eq!(table.iter().filter(|r| r.is_selected).count(), 0);
    }

    #[test]
    fn test_costs_scale_with_total_pieces() {
        let inputs = SampleSizeInputs::default();
        let table = generate_mde_sensitivity_table(&inputs, 0.20);
        for row in &table {
            assert_eq!(row.total_mail_pieces, row.sample_size_per_variation * 2.0);
            assert!(
                (row.estimated_cost - row.total_mail_pieces * inputs.cost_per_piece).abs() < 1e-9
            );
        }
    }
}
