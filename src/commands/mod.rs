//! Command handlers: merge inputs, validate, compute, write the report.
//!
//! Precedence for every input field: CLI flag > config file > built-in
//! default. Validation happens here, after the merge; the engines accept
//! whatever they are handed.

use std::path::PathBuf;

use crate::config::MailmetricsConfig;
use crate::funnel::{self, Assumptions};
use crate::io::{create_writer, OutputFormat, Report, RoasReport, SampleSizeReport};
use crate::sample_size::{self, Power, SampleSizeInputs, Significance};

/// Resolved options for the `roas` subcommand.
#[derive(Debug, Default)]
pub struct RoasCommand {
    pub mail_pieces: Option<f64>,
    pub cost_per_piece: Option<f64>,
    pub net_lead_ratio: Option<f64>,
    pub contract_rate: Option<f64>,
    pub contract_value: Option<f64>,
    pub close_rate: Option<f64>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Resolved options for the `sample-size` subcommand.
#[derive(Debug, Default)]
pub struct SampleSizeCommand {
    pub baseline_rate: Option<f64>,
    pub mde: Option<f64>,
    pub significance: Option<Significance>,
    pub power: Option<Power>,
    pub cost_per_piece: Option<f64>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Run the ROAS calculator and write its report.
pub fn run_roas(cmd: RoasCommand) -> anyhow::Result<()> {
    let config = MailmetricsConfig::load_or_default(cmd.config.as_deref())?;
    let assumptions = merge_assumptions(&cmd, config.roas.assumptions());
    assumptions.validate()?;
    log::debug!("running roas calculation: {assumptions:?}");

    let results = funnel::calculate_all(&assumptions);
    let report = Report::Roas(RoasReport::new(assumptions, results));
    create_writer(cmd.format, cmd.output.as_deref())?.write_report(&report)
}

/// Run the sample-size calculator and write its report.
pub fn run_sample_size(cmd: SampleSizeCommand) -> anyhow::Result<()> {
    let config = MailmetricsConfig::load_or_default(cmd.config.as_deref())?;
    let inputs = merge_inputs(&cmd, config.sample_size.inputs());
    inputs.validate()?;
    log::debug!("running sample-size calculation: {inputs:?}");

    let results = sample_size::calculate_all_results(&inputs);
    let sensitivity = sample_size::generate_mde_sensitivity_table(&inputs, inputs.mde);
    let report = Report::SampleSize(SampleSizeReport::new(inputs, results, sensitivity));
    create_writer(cmd.format, cmd.output.as_deref())?.write_report(&report)
}

fn merge_assumptions(cmd: &RoasCommand, base: Assumptions) -> Assumptions {
    Assumptions {
        mail_pieces: cmd.mail_pieces.unwrap_or(base.mail_pieces),
        cost_per_piece: cmd.cost_per_piece.unwrap_or(base.cost_per_piece),
        net_lead_ratio: cmd.net_lead_ratio.unwrap_or(base.net_lead_ratio),
        contract_rate: cmd.contract_rate.unwrap_or(base.contract_rate),
        contract_value: cmd.contract_value.unwrap_or(base.contract_value),
        close_rate: cmd.close_rate.unwrap_or(base.close_rate),
    }
}

fn merge_inputs(cmd: &SampleSizeCommand, base: SampleSizeInputs) -> SampleSizeInputs {
    SampleSizeInputs {
        baseline_rate: cmd.baseline_rate.unwrap_or(base.baseline_rate),
        mde: cmd.mde.unwrap_or(base.mde),
        significance: cmd
            .significance
            .map(|s| s.level())
            .unwrap_or(base.significance),
        power: cmd.power.map(|p| p.level()).unwrap_or(base.power),
        cost_per_piece: cmd.cost_per_piece.unwrap_or(base.cost_per_piece),
    }
}
