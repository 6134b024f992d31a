//! Scenario tables for the funnel engine.
//!
//! Two independent sensitivity axes:
//!
//! 1. Response-rate scenarios: five multipliers applied to the base gross
//!    response rate, each propagated through every remaining funnel stage.
//!    Row `i` of every stage table describes the same underlying scenario.
//! 2. Contract-rate sweep: holds net leads at the expected value and varies
//!    only the contract rate, recomputing ROAS per rate.
//!
//! Each stage gets its own row type; the fields say what the numbers mean at
//! that stage instead of reusing one generic value/rate/cost shape.

use serde::Serialize;

use super::{
    closed_deals, contracts, gross_leads, net_leads, revenue, roas, BASELINE_SCENARIO_INDEX,
    BASE_RESPONSE_RATE, CONTRACT_RATE_SWEEP, RESPONSE_RATE_MULTIPLIERS,
};

/// One gross-lead scenario: leads at a swept response rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrossLeadsRow {
    pub leads: f64,
    /// Gross response rate for this scenario.
    pub response_rate: f64,
    /// Campaign cost per gross lead; zero when the scenario yields no leads.
    pub cost_per_lead: f64,
    pub is_baseline: bool,
}

/// Net leads for one gross-lead scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetLeadsRow {
    pub leads: f64,
    /// Net response rate (gross response rate times net lead ratio).
    pub response_rate: f64,
    pub cost_per_lead: f64,
    pub is_baseline: bool,
}

/// Contracts for one gross-lead scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContractsRow {
    pub contracts: f64,
    pub cost_per_contract: f64,
    /// Gross contract value before the close-rate haircut.
    pub gross_value: f64,
    pub is_baseline: bool,
}

/// Closed deals and resulting ROAS for one gross-lead scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosedDealsRow {
    pub closed_deals: f64,
    pub net_revenue: f64,
    pub roas: f64,
    pub is_baseline: bool,
}

/// One entry of the contract-rate sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContractRateRow {
    /// Held fixed at the expected net leads.
    pub net_leads: f64,
    pub contract_rate: f64,
    pub roas: f64,
    pub is_baseline: bool,
}

/// Gross leads across the five response-rate scenarios.
pub fn generate_gross_leads_table(mail_pieces: f64, total_cost: f64) -> Vec<GrossLeadsRow> {
    RESPONSE_RATE_MULTIPLIERS
        .iter()
        .enumerate()
        .map(|(index, multiplier)| {
            let response_rate = BASE_RESPONSE_RATE * multiplier;
            let leads = gross_leads(mail_pieces, response_rate);
            let cost_per_lead = if leads > 0.0 { total_cost / leads } else { 0.0 };

            GrossLeadsRow {
                leads,
                response_rate,
                cost_per_lead,
                is_baseline: index == BASELINE_SCENARIO_INDEX,
            }
        })
        .collect()
}

/// Net leads per scenario, derived from the gross-lead table.
pub fn generate_net_leads_table(
    gross_leads_table: &[GrossLeadsRow],
    net_lead_ratio: f64,
    total_cost: f64,
) -> Vec<NetLeadsRow> {
    gross_leads_table
        .iter()
        .map(|row| {
            let leads = net_leads(row.leads, net_lead_ratio);
            let response_rate = row.response_rate * net_lead_ratio;
            let cost_per_lead = if leads > 0.0 { total_cost / leads } else { 0.0 };

            NetLeadsRow {
                leads,
                response_rate,
                cost_per_lead,
                is_baseline: row.is_baseline,
            }
        })
        .collect()
}

/// Contracts per scenario, derived from the net-lead table.
pub fn generate_contracts_table(
    net_leads_table: &[NetLeadsRow],
    contract_rate: f64,
    contract_value: f64,
    total_cost: f64,
) -> Vec<ContractsRow> {
    net_leads_table
        .iter()
        .map(|row| {
            let contracts = contracts(row.leads, contract_rate);
            let cost_per_contract = if contracts > 0.0 {
                total_cost / contracts
            } else {
                0.0
            };
            let gross_value = contracts * contract_value;

            ContractsRow {
                contracts,
                cost_per_contract,
                gross_value,
                is_baseline: row.is_baseline,
            }
        })
        .collect()
}

/// Closed deals and ROAS per scenario, derived from the contracts table.
pub fn generate_closed_deals_table(
    contracts_table: &[ContractsRow],
    close_rate: f64,
    contract_value: f64,
    total_cost: f64,
) -> Vec<ClosedDealsRow> {
    contracts_table
        .iter()
        .map(|row| {
            let closed = closed_deals(row.contracts, close_rate);
            let net_revenue = revenue(closed, contract_value);

            ClosedDealsRow {
                closed_deals: closed,
                net_revenue,
                roas: roas(net_revenue, total_cost),
                is_baseline: row.is_baseline,
            }
        })
        .collect()
}

/// ROAS across the contract-rate sweep, holding net leads at the expected
/// value.
pub fn generate_contract_rate_sensitivity(
    expected_net_leads: f64,
    contract_value: f64,
    close_rate: f64,
    total_cost: f64,
) -> Vec<ContractRateRow> {
    CONTRACT_RATE_SWEEP
        .iter()
        .enumerate()
        .map(|(index, rate)| {
            let contracts = contracts(expected_net_leads, *rate);
            let closed = closed_deals(contracts, close_rate);
            let rev = revenue(closed, contract_value);

            ContractRateRow {
                net_leads: expected_net_leads,
                contract_rate: *rate,
                roas: roas(rev, total_cost),
                is_baseline: index == BASELINE_SCENARIO_INDEX,
            }
        })
        .collect()
}
