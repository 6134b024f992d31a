//! Direct mail ROAS funnel engine.
//!
//! Models a mail campaign as a five-stage funnel: mail pieces -> gross leads ->
//! net leads -> contracts -> closed deals -> revenue. Every function here is a
//! pure function of its inputs; results carry raw doubles and all rounding is
//! left to the formatting layer.
//!
//! The gross response rate is a fixed model parameter
//! ([`BASE_RESPONSE_RATE`]), not a user assumption; the sensitivity tables
//! sweep it across scenarios instead.

pub mod tables;

use serde::{Deserialize, Serialize};

pub use tables::{
    generate_closed_deals_table, generate_contract_rate_sensitivity, generate_contracts_table,
    generate_gross_leads_table, generate_net_leads_table, ClosedDealsRow, ContractRateRow,
    ContractsRow, GrossLeadsRow, NetLeadsRow,
};

use crate::errors::ValidationError;

/// Gross response rate assumed for the expected case (0.4%).
pub const BASE_RESPONSE_RATE: f64 = 0.004;

/// Response-rate multipliers for the scenario tables, worst to best.
/// Index 2 (multiplier 1.0) is the baseline scenario.
pub const RESPONSE_RATE_MULTIPLIERS: [f64; 5] = [0.5, 0.75, 1.0, 1.25, 1.5];

/// Contract rates swept by the contract-rate sensitivity table.
/// Index 2 (8%) is the baseline.
pub const CONTRACT_RATE_SWEEP: [f64; 5] = [0.04, 0.06, 0.08, 0.10, 0.12];

/// Index of the baseline row in every five-row scenario table.
pub const BASELINE_SCENARIO_INDEX: usize = 2;

/// Campaign assumptions driving a funnel calculation.
///
/// Counts and rates are plain doubles; the engine does not clamp them. Use
/// [`Assumptions::validate`] at input boundaries to reject out-of-range
/// values before computing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Number of mail pieces in the campaign.
    pub mail_pieces: f64,
    /// Cost per mail piece in dollars.
    pub cost_per_piece: f64,
    /// Net leads / gross leads (0-1).
    pub net_lead_ratio: f64,
    /// Contracts / net leads (0-1).
    pub contract_rate: f64,
    /// Average profit per closed deal in dollars.
    pub contract_value: f64,
    /// Contract-to-close rate (0-1).
    pub close_rate: f64,
}

impl Default for Assumptions {
    /// Industry-average defaults for a mid-size campaign.
    fn default() -> Self {
        Self {
            mail_pieces: 25_000.0,
            cost_per_piece: 0.63,
            net_lead_ratio: 0.50,
            contract_rate: 0.08,
            contract_value: 15_000.0,
            close_rate: 0.75,
        }
    }
}

impl Assumptions {
    /// Check that rates are proportions and amounts are non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_amount("mail_pieces", self.mail_pieces)?;
        ValidationError::check_amount("cost_per_piece", self.cost_per_piece)?;
        ValidationError::check_rate("net_lead_ratio", self.net_lead_ratio)?;
        ValidationError::check_rate("contract_rate", self.contract_rate)?;
        ValidationError::check_amount("contract_value", self.contract_value)?;
        ValidationError::check_rate("close_rate", self.close_rate)?;
        Ok(())
    }
}

/// Expected-case metrics plus scenario tables for one set of assumptions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResults {
    pub total_cost: f64,
    pub expected_gross_leads: f64,
    pub expected_net_leads: f64,
    pub expected_contracts: f64,
    pub expected_closed: f64,
    pub expected_revenue: f64,
    pub expected_roas: f64,
    /// ROI as a percentage (e.g. 185.7 for +185.7%).
    pub expected_roi: f64,

    pub gross_leads_table: Vec<GrossLeadsRow>,
    pub net_leads_table: Vec<NetLeadsRow>,
    pub contracts_table: Vec<ContractsRow>,
    pub closed_deals_table: Vec<ClosedDealsRow>,
    pub contract_rate_sensitivity: Vec<ContractRateRow>,
}

/// Total campaign cost.
pub fn total_cost(mail_pieces: f64, cost_per_piece: f64) -> f64 {
    mail_pieces * cost_per_piece
}

/// Gross leads generated at a given response rate.
pub fn gross_leads(mail_pieces: f64, response_rate: f64) -> f64 {
    mail_pieces * response_rate
}

/// Net (qualified) leads from gross leads.
pub fn net_leads(gross_leads: f64, net_lead_ratio: f64) -> f64 {
    gross_leads * net_lead_ratio
}

/// Signed contracts from net leads.
pub fn contracts(net_leads: f64, contract_rate: f64) -> f64 {
    net_leads * contract_rate
}

/// Closed deals from contracts.
pub fn closed_deals(contracts: f64, close_rate: f64) -> f64 {
    contracts * close_rate
}

/// Revenue from closed deals.
pub fn revenue(closed_deals: f64, contract_value: f64) -> f64 {
    closed_deals * contract_value
}

/// Return on ad spend as a multiplier. Zero when the campaign cost nothing.
pub fn roas(revenue: f64, total_cost: f64) -> f64 {
    if total_cost == 0.0 {
        return 0.0;
    }
    revenue / total_cost
}

/// Return on investment as a percentage. Zero when the campaign cost nothing.
pub fn roi(revenue: f64, total_cost: f64) -> f64 {
    if total_cost == 0.0 {
        return 0.0;
    }
    (revenue - total_cost) / total_cost * 100.0
}

/// Compute expected-case metrics and all sensitivity tables.
pub fn calculate_all(assumptions: &Assumptions) -> CalculationResults {
    let Assumptions {
        mail_pieces,
        cost_per_piece,
        net_lead_ratio,
        contract_rate,
        contract_value,
        close_rate,
    } = *assumptions;

    let total_cost = total_cost(mail_pieces, cost_per_piece);
    let expected_gross_leads = gross_leads(mail_pieces, BASE_RESPONSE_RATE);
    let expected_net_leads = net_leads(expected_gross_leads, net_lead_ratio);
    let expected_contracts = contracts(expected_net_leads, contract_rate);
    let expected_closed = closed_deals(expected_contracts, close_rate);
    let expected_revenue = revenue(expected_closed, contract_value);
    let expected_roas = roas(expected_revenue, total_cost);
    let expected_roi = roi(expected_revenue, total_cost);

    // Each later-stage table propagates the same five response-rate
    // scenarios, so one row reads consistently across all four tables.
    let gross_leads_table = generate_gross_leads_table(mail_pieces, total_cost);
    let net_leads_table = generate_net_leads_table(&gross_leads_table, net_lead_ratio, total_cost);
    let contracts_table =
        generate_contracts_table(&net_leads_table, contract_rate, contract_value, total_cost);
    let closed_deals_table =
        generate_closed_deals_table(&contracts_table, close_rate, contract_value, total_cost);
    let contract_rate_sensitivity = generate_contract_rate_sensitivity(
        expected_net_leads,
        contract_value,
        close_rate,
        total_cost,
    );

    CalculationResults {
        total_cost,
        expected_gross_leads,
        expected_net_leads,
        expected_contracts,
        expected_closed,
        expected_revenue,
        expected_roas,
        expected_roi,
        gross_leads_table,
        net_leads_table,
        contracts_table,
        closed_deals_table,
        contract_rate_sensitivity,
    }
}
