use anyhow::Result;
use clap::Parser;
use mailmetrics::cli::{Cli, Commands};
use mailmetrics::commands::{run_roas, run_sample_size, RoasCommand, SampleSizeCommand};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Roas {
            mail_pieces,
            cost_per_piece,
            net_lead_ratio,
            contract_rate,
            contract_value,
            close_rate,
            format,
            output,
            config,
        } => run_roas(RoasCommand {
            mail_pieces,
            cost_per_piece,
            net_lead_ratio,
            contract_rate,
            contract_value,
            close_rate,
            format: format.into(),
            output,
            config,
        }),
        Commands::SampleSize {
            baseline_rate,
            mde,
            significance,
            power,
            cost_per_piece,
            format,
            output,
            config,
        } => run_sample_size(SampleSizeCommand {
            baseline_rate,
            mde,
            significance: significance.map(Into::into),
            power: power.map(Into::into),
            cost_per_piece,
            format: format.into(),
            output,
            config,
        }),
    }
}
