//! TOML configuration for calculator defaults.
//!
//! A config file lets a user pin their own campaign assumptions instead of
//! repeating CLI flags:
//!
//! ```toml
//! [roas]
//! mail_pieces = 50000
//! cost_per_piece = 0.58
//!
//! [sample-size]
//! baseline_rate = 0.007
//! ```
//!
//! Every field is optional and defaults to the engine defaults; CLI flags
//! override config values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::MailmetricsError;
use crate::funnel::Assumptions;
use crate::sample_size::SampleSizeInputs;

/// Root of the mailmetrics config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailmetricsConfig {
    #[serde(default)]
    pub roas: RoasConfig,

    #[serde(default, rename = "sample-size")]
    pub sample_size: SampleSizeConfig,
}

impl MailmetricsConfig {
    /// Load a config file, erroring on unreadable or malformed TOML.
    pub fn load(path: &Path) -> Result<Self, MailmetricsError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            MailmetricsError::config_with_path(format!("failed to read config: {e}"), path)
        })?;
        toml::from_str(&contents).map_err(|e| {
            MailmetricsError::config_with_path(format!("failed to parse config: {e}"), path)
        })
    }

    /// Load the config at `path`, or fall back to defaults when no path is
    /// given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, MailmetricsError> {
        match path {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}

/// `[roas]` section: campaign assumption overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoasConfig {
    #[serde(default = "default_mail_pieces")]
    pub mail_pieces: f64,

    #[serde(default = "default_cost_per_piece")]
    pub cost_per_piece: f64,

    #[serde(default = "default_net_lead_ratio")]
    pub net_lead_ratio: f64,

    #[serde(default = "default_contract_rate")]
    pub contract_rate: f64,

    #[serde(default = "default_contract_value")]
    pub contract_value: f64,

    #[serde(default = "default_close_rate")]
    pub close_rate: f64,
}

impl Default for RoasConfig {
    fn default() -> Self {
        let defaults = Assumptions::default();
        Self {
            mail_pieces: defaults.mail_pieces,
            cost_per_piece: defaults.cost_per_piece,
            net_lead_ratio: defaults.net_lead_ratio,
            contract_rate: defaults.contract_rate,
            contract_value: defaults.contract_value,
            close_rate: defaults.close_rate,
        }
    }
}

impl RoasConfig {
    /// Convert to engine assumptions.
    pub fn assumptions(&self) -> Assumptions {
        Assumptions {
            mail_pieces: self.mail_pieces,
            cost_per_piece: self.cost_per_piece,
            net_lead_ratio: self.net_lead_ratio,
            contract_rate: self.contract_rate,
            contract_value: self.contract_value,
            close_rate: self.close_rate,
        }
    }
}

/// `[sample-size]` section: A/B test input overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSizeConfig {
    #[serde(default = "default_baseline_rate")]
    pub baseline_rate: f64,

    #[serde(default = "default_mde")]
    pub mde: f64,

    #[serde(default = "default_significance")]
    pub significance: f64,

    #[serde(default = "default_power")]
    pub power: f64,

    #[serde(default = "default_cost_per_piece")]
    pub cost_per_piece: f64,
}

impl Default for SampleSizeConfig {
    fn default() -> Self {
        let defaults = SampleSizeInputs::default();
        Self {
            baseline_rate: defaults.baseline_rate,
            mde: defaults.mde,
            significance: defaults.significance,
            power: defaults.power,
            cost_per_piece: defaults.cost_per_piece,
        }
    }
}

impl SampleSizeConfig {
    /// Convert to engine inputs.
    pub fn inputs(&self) -> SampleSizeInputs {
        SampleSizeInputs {
            baseline_rate: self.baseline_rate,
            mde: self.mde,
            significance: self.significance,
            power: self.power,
            cost_per_piece: self.cost_per_piece,
        }
    }
}

fn default_mail_pieces() -> f64 {
    Assumptions::default().mail_pieces
}

fn default_cost_per_piece() -> f64 {
    Assumptions::default().cost_per_piece
}

fn default_net_lead_ratio() -> f64 {
    Assumptions::default().net_lead_ratio
}

fn default_contract_rate() -> f64 {
    Assumptions::default().contract_rate
}

fn default_contract_value() -> f64 {
    Assumptions::default().contract_value
}

fn default_close_rate() -> f64 {
    Assumptions::default().close_rate
}

fn default_baseline_rate() -> f64 {
    SampleSizeInputs::default().baseline_rate
}

fn default_mde() -> f64 {
    SampleSizeInputs::default().mde
}

fn default_significance() -> f64 {
    SampleSizeInputs::default().significance
}

fn default_power() -> f64 {
    SampleSizeInputs::default().power
}
