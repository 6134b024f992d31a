use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::io::OutputFormat;
use crate::sample_size::{Power, Significance};

#[derive(Parser, Debug)]
#[command(name = "mailmetrics")]
#[command(about = "Direct mail campaign ROAS and A/B test sample size analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Model a mail campaign funnel and its expected ROAS
    Roas {
        /// Number of mail pieces in the campaign
        #[arg(long)]
        mail_pieces: Option<f64>,

        /// Cost per mail piece in dollars
        #[arg(long)]
        cost_per_piece: Option<f64>,

        /// Net leads as a fraction of gross leads (0-1)
        #[arg(long)]
        net_lead_ratio: Option<f64>,

        /// Contracts as a fraction of net leads (0-1)
        #[arg(long)]
        contract_rate: Option<f64>,

        /// Average profit per closed deal in dollars
        #[arg(long)]
        contract_value: Option<f64>,

        /// Closed deals as a fraction of contracts (0-1)
        #[arg(long)]
        close_rate: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: FormatArg,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML config file with assumption overrides
        #[arg(long, env = "MAILMETRICS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Size an A/B test for a target detectable lift in response rate
    SampleSize {
        /// Baseline response rate as a fraction, e.g. 0.005 for 0.5%
        #[arg(long)]
        baseline_rate: Option<f64>,

        /// Minimum detectable effect as a relative fraction, e.g. 0.20 for +20%
        #[arg(long)]
        mde: Option<f64>,

        /// Statistical significance level
        #[arg(long, value_enum)]
        significance: Option<SignificanceArg>,

        /// Statistical power
        #[arg(long, value_enum)]
        power: Option<PowerArg>,

        /// Cost per mail piece in dollars
        #[arg(long)]
        cost_per_piece: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: FormatArg,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML config file with input overrides
        #[arg(long, env = "MAILMETRICS_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Terminal,
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Terminal => OutputFormat::Terminal,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SignificanceArg {
    /// 90% confidence
    #[value(name = "90")]
    Ninety,
    /// 95% confidence (industry standard)
    #[value(name = "95")]
    NinetyFive,
    /// 99% confidence
    #[value(name = "99")]
    NinetyNine,
}

impl From<SignificanceArg> for Significance {
    fn from(arg: SignificanceArg) -> Self {
        match arg {
            SignificanceArg::Ninety => Significance::Ninety,
            SignificanceArg::NinetyFive => Significance::NinetyFive,
            SignificanceArg::NinetyNine => Significance::NinetyNine,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PowerArg {
    /// 80% power (industry standard)
    #[value(name = "80")]
    Eighty,
    /// 85% power
    #[value(name = "85")]
    EightyFive,
    /// 90% power
    #[value(name = "90")]
    Ninety,
}

impl From<PowerArg> for Power {
    fn from(arg: PowerArg) -> Self {
        match arg {
            PowerArg::Eighty => Power::Eighty,
            PowerArg::EightyFive => Power::EightyFive,
            PowerArg::Ninety => Power::Ninety,
        }
    }
}
