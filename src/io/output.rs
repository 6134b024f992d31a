//! Report writers for calculator results.
//!
//! One report type per calculator, three renderings each: pretty JSON for
//! machines, Markdown for docs/PRs, and a colored terminal view with tables.

use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::formatting::{format_currency, format_mde, format_number, format_percent, format_roas};
use crate::funnel::{Assumptions, CalculationResults};
use crate::rating::{RoasRating, SampleSizeRating};
use crate::sample_size::{
    MdeSensitivityRow, Power, SampleSizeInputs, SampleSizeResults, Significance,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

/// A complete, self-describing calculator report.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "report", rename_all = "kebab-case")]
pub enum Report {
    Roas(RoasReport),
    SampleSize(SampleSizeReport),
}

/// ROAS calculation plus the assumptions that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct RoasReport {
    pub timestamp: DateTime<Utc>,
    pub assumptions: Assumptions,
    pub results: CalculationResults,
    pub rating: RoasRating,
}

impl RoasReport {
    pub fn new(assumptions: Assumptions, results: CalculationResults) -> Self {
        let rating = RoasRating::from_roas(results.expected_roas);
        Self {
            timestamp: Utc::now(),
            assumptions,
            results,
            rating,
        }
    }
}

/// Sample-size calculation plus its inputs and MDE sensitivity.
#[derive(Debug, Clone, Serialize)]
pub struct SampleSizeReport {
    pub timestamp: DateTime<Utc>,
    pub inputs: SampleSizeInputs,
    pub results: SampleSizeResults,
    pub rating: SampleSizeRating,
    pub mde_sensitivity: Vec<MdeSensitivityRow>,
}

impl SampleSizeReport {
    pub fn new(
        inputs: SampleSizeInputs,
        results: SampleSizeResults,
        mde_sensitivity: Vec<MdeSensitivityRow>,
    ) -> Self {
        let rating = SampleSizeRating::from_sample_size(results.sample_size_per_variation);
        Self {
            timestamp: Utc::now(),
            inputs,
            results,
            rating,
            mde_sensitivity,
        }
    }
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

/// Create a writer for the requested format, targeting a file or stdout.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn ReportWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Roas(roas) => self.write_roas(roas),
            Report::SampleSize(ss) => self.write_sample_size(ss),
        }
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, title: &str, timestamp: &DateTime<Utc>) -> anyhow::Result<()> {
        writeln!(self.writer, "# {title}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_roas(&mut self, report: &RoasReport) -> anyhow::Result<()> {
        self.write_header("Direct Mail ROAS Report", &report.timestamp)?;

        let a = &report.assumptions;
        let r = &report.results;

        writeln!(self.writer, "## Assumptions")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Assumption | Value |")?;
        writeln!(self.writer, "|------------|-------|")?;
        writeln!(
            self.writer,
            "| Mail pieces | {} |",
            format_number(a.mail_pieces, 0)
        )?;
        writeln!(
            self.writer,
            "| Cost per piece | {} |",
            format_currency(a.cost_per_piece, 2)
        )?;
        writeln!(
            self.writer,
            "| Net lead ratio | {} |",
            format_percent(a.net_lead_ratio, 0)
        )?;
        writeln!(
            self.writer,
            "| Contract rate | {} |",
            format_percent(a.contract_rate, 0)
        )?;
        writeln!(
            self.writer,
            "| Contract value | {} |",
            format_currency(a.contract_value, 0)
        )?;
        writeln!(
            self.writer,
            "| Close rate | {} |",
            format_percent(a.close_rate, 0)
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Expected Outcome")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Total cost | {} |",
            format_currency(r.total_cost, 0)
        )?;
        writeln!(
            self.writer,
            "| Gross leads | {} |",
            format_number(r.expected_gross_leads, 0)
        )?;
        writeln!(
            self.writer,
            "| Net leads | {} |",
            format_number(r.expected_net_leads, 0)
        )?;
        writeln!(
            self.writer,
            "| Contracts | {} |",
            format_number(r.expected_contracts, 1)
        )?;
        writeln!(
            self.writer,
            "| Closed deals | {} |",
            format_number(r.expected_closed, 1)
        )?;
        writeln!(
            self.writer,
            "| Revenue | {} |",
            format_currency(r.expected_revenue, 0)
        )?;
        writeln!(
            self.writer,
            "| ROAS | {} ({}) |",
            format_roas(r.expected_roas),
            report.rating.label()
        )?;
        writeln!(
            self.writer,
            "| ROI | {} |",
            format_percent(r.expected_roi / 100.0, 1)
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Response Rate Scenarios")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Response Rate | Gross Leads | Net Leads | Contracts | Closed | Revenue | ROAS |"
        )?;
        writeln!(
            self.writer,
            "|---------------|-------------|-----------|-----------|--------|---------|------|"
        )?;
        for i in 0..r.gross_leads_table.len() {
            let gross = &r.gross_leads_table[i];
            let net = &r.net_leads_table[i];
            let contracts = &r.contracts_table[i];
            let closed = &r.closed_deals_table[i];
            let marker = if gross.is_baseline { " (expected)" } else { "" };
            writeln!(
                self.writer,
                "| {}{} | {} | {} | {} | {} | {} | {} |",
                format_percent(gross.response_rate, 2),
                marker,
                format_number(gross.leads, 0),
                format_number(net.leads, 0),
                format_number(contracts.contracts, 1),
                format_number(closed.closed_deals, 1),
                format_currency(closed.net_revenue, 0),
                format_roas(closed.roas),
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "## Contract Rate Sensitivity")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Contract Rate | Net Leads | ROAS |")?;
        writeln!(self.writer, "|---------------|-----------|------|")?;
        for row in &r.contract_rate_sensitivity {
            let marker = if row.is_baseline { " (expected)" } else { "" };
            writeln!(
                self.writer,
                "| {}{} | {} | {} |",
                format_percent(row.contract_rate, 0),
                marker,
                format_number(row.net_leads, 0),
                format_roas(row.roas),
            )?;
        }
        Ok(())
    }

    fn write_sample_size(&mut self, report: &SampleSizeReport) -> anyhow::Result<()> {
        self.write_header("A/B Test Sample Size Report", &report.timestamp)?;

        let significance = Significance::from_level_or_default(report.inputs.significance);
        let power = Power::from_level_or_default(report.inputs.power);

        writeln!(self.writer, "## Test Design")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Input | Value |")?;
        writeln!(self.writer, "|-------|-------|")?;
        writeln!(
            self.writer,
            "| Baseline response rate | {} |",
            format_percent(report.inputs.baseline_rate, 2)
        )?;
        writeln!(
            self.writer,
            "| Minimum detectable effect | {} |",
            format_mde(report.inputs.mde, true)
        )?;
        writeln!(
            self.writer,
            "| Significance | {} |",
            significance.label()
        )?;
        writeln!(
            self.writer,
            "| Power | {} ({}) |",
            power.label(),
            power.description()
        )?;
        writeln!(self.writer)?;

        let r = &report.results;
        writeln!(self.writer, "## Required Sample")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Per variation | {} |",
            format_number(r.sample_size_per_variation, 0)
        )?;
        writeln!(
            self.writer,
            "| Total mail pieces | {} |",
            format_number(r.total_mail_pieces, 0)
        )?;
        writeln!(
            self.writer,
            "| Estimated cost | {} |",
            format_currency(r.estimated_cost, 2)
        )?;
        writeln!(
            self.writer,
            "| Expected variation rate | {} |",
            format_percent(r.expected_variation_rate, 2)
        )?;
        writeln!(
            self.writer,
            "| Feasibility | {} ({}) |",
            report.rating.label(),
            report.rating.description()
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## MDE Sensitivity")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| MDE | Per Variation | Total Pieces | Estimated Cost |"
        )?;
        writeln!(
            self.writer,
            "|-----|---------------|--------------|----------------|"
        )?;
        for row in &report.mde_sensitivity {
            let marker = if row.is_selected { " (selected)" } else { "" };
            writeln!(
                self.writer,
                "| {}{} | {} | {} | {} |",
                format_mde(row.mde, true),
                marker,
                format_number(row.sample_size_per_variation, 0),
                format_number(row.total_mail_pieces, 0),
                format_currency(row.estimated_cost, 2),
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn rating_colored(label: &str, good: bool) -> ColoredString {
        if good {
            label.green().bold()
        } else {
            label.yellow().bold()
        }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Roas(roas) => self.write_roas(roas),
            Report::SampleSize(ss) => self.write_sample_size(ss),
        }
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_roas(&mut self, report: &RoasReport) -> anyhow::Result<()> {
        let r = &report.results;
        writeln!(self.writer, "{}", "Direct Mail ROAS".blue().bold())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "  Total cost:  {}",
            format_currency(r.total_cost, 0)
        )?;
        writeln!(
            self.writer,
            "  Revenue:     {}",
            format_currency(r.expected_revenue, 0)
        )?;

        let good = matches!(report.rating, RoasRating::Excellent | RoasRating::Good);
        writeln!(
            self.writer,
            "  ROAS:        {} {}",
            format_roas(r.expected_roas),
            Self::rating_colored(report.rating.label(), good)
        )?;
        writeln!(
            self.writer,
            "  ROI:         {}",
            format_percent(r.expected_roi / 100.0, 1)
        )?;
        writeln!(self.writer)?;

        let mut scenarios = Table::new();
        scenarios
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                "Response Rate",
                "Gross Leads",
                "Net Leads",
                "Contracts",
                "Closed",
                "Revenue",
                "ROAS",
            ]);
        for i in 0..r.gross_leads_table.len() {
            let gross = &r.gross_leads_table[i];
            let net = &r.net_leads_table[i];
            let contracts = &r.contracts_table[i];
            let closed = &r.closed_deals_table[i];
            let rate = if gross.is_baseline {
                format!("{} *", format_percent(gross.response_rate, 2))
            } else {
                format_percent(gross.response_rate, 2)
            };
            scenarios.add_row(vec![
                rate,
                format_number(gross.leads, 0),
                format_number(net.leads, 0),
                format_number(contracts.contracts, 1),
                format_number(closed.closed_deals, 1),
                format_currency(closed.net_revenue, 0),
                format_roas(closed.roas),
            ]);
        }
        writeln!(self.writer, "{}", "Response rate scenarios".bold())?;
        writeln!(self.writer, "{scenarios}")?;
        writeln!(self.writer)?;

        let mut sweep = Table::new();
        sweep
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Contract Rate", "Net Leads", "ROAS"]);
        for row in &r.contract_rate_sensitivity {
            let rate = if row.is_baseline {
                format!("{} *", format_percent(row.contract_rate, 0))
            } else {
                format_percent(row.contract_rate, 0)
            };
            sweep.add_row(vec![
                rate,
                format_number(row.net_leads, 0),
                format_roas(row.roas),
            ]);
        }
        writeln!(self.writer, "{}", "Contract rate sensitivity".bold())?;
        writeln!(self.writer, "{sweep}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "* expected scenario".dimmed())?;
        Ok(())
    }

    fn write_sample_size(&mut self, report: &SampleSizeReport) -> anyhow::Result<()> {
        let r = &report.results;
        let significance = Significance::from_level_or_default(report.inputs.significance);
        let power = Power::from_level_or_default(report.inputs.power);

        writeln!(self.writer, "{}", "A/B Test Sample Size".blue().bold())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "  Baseline rate:   {}",
            format_percent(report.inputs.baseline_rate, 2)
        )?;
        writeln!(
            self.writer,
            "  Detectable lift: {} ({} significance, {} power)",
            format_mde(report.inputs.mde, true),
            significance.label(),
            power.label()
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "  Per variation:   {}",
            format_number(r.sample_size_per_variation, 0)
        )?;
        writeln!(
            self.writer,
            "  Total pieces:    {}",
            format_number(r.total_mail_pieces, 0)
        )?;
        writeln!(
            self.writer,
            "  Estimated cost:  {}",
            format_currency(r.estimated_cost, 2)
        )?;

        let good = matches!(
            report.rating,
            SampleSizeRating::Easy | SampleSizeRating::Moderate
        );
        writeln!(
            self.writer,
            "  Feasibility:     {} ({})",
            Self::rating_colored(report.rating.label(), good),
            report.rating.description()
        )?;
        writeln!(self.writer)?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["MDE", "Per Variation", "Total Pieces", "Cost"]);
        for row in &report.mde_sensitivity {
            let mde = if row.is_selected {
                format!("{} *", format_mde(row.mde, true))
            } else {
                format_mde(row.mde, true)
            };
            table.add_row(vec![
                mde,
                format_number(row.sample_size_per_variation, 0),
                format_number(row.total_mail_pieces, 0),
                format_currency(row.estimated_cost, 2),
            ]);
        }
        writeln!(self.writer, "{}", "MDE sensitivity".bold())?;
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "* selected MDE".dimmed())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::calculate_all;
    use crate::sample_size::{calculate_all_results, generate_mde_sensitivity_table};

    fn roas_report() -> Report {
        let assumptions = Assumptions::default();
        Report::Roas(RoasReport::new(assumptions, calculate_all(&assumptions)))
    }

    fn sample_size_report(inputs: SampleSizeInputs) -> Report {
        Report::SampleSize(SampleSizeReport::new(
            inputs,
            calculate_all_results(&inputs),
            generate_mde_sensitivity_table(&inputs, inputs.mde),
        ))
    }

    #[test]
    fn test_json_writer_emits_tagged_report() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf).write_report(&roas_report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["report"], "roas");
        assert_eq!(value["results"]["total_cost"], 15_750.0);
        assert_eq!(value["rating"], "good");
    }

    #[test]
    fn test_json_writer_sample_size_report() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf)
            .write_report(&sample_size_report(SampleSizeInputs::default()))
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["report"], "sample-size");
        assert_eq!(value["results"]["sample_size_per_variation"], 85_863.0);
        assert_eq!(value["mde_sensitivity"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_markdown_writer_renders_tables() {
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf)
            .write_report(&roas_report())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("# Direct Mail ROAS Report"));
        assert!(text.contains("| Total cost | $15,750 |"));
        assert!(text.contains("0.40% (expected)"));
        assert!(text.contains("## Contract Rate Sensitivity"));
    }

    #[test]
    fn test_markdown_infinite_sample_renders_placeholder() {
        let inputs = SampleSizeInputs {
            mde: 0.0,
            ..SampleSizeInputs::default()
        };
        let report = Report::SampleSize(SampleSizeReport::new(
            inputs,
            calculate_all_results(&inputs),
            generate_mde_sensitivity_table(&inputs, inputs.mde),
        ));
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf).write_report(&report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| Per variation | — |"));
        assert!(!text.contains("inf"));
    }

    #[test]
    fn test_terminal_writer_mentions_ratings() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        TerminalWriter::new(&mut buf)
            .write_report(&sample_size_report(SampleSizeInputs::default()))
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("85,863"));
        assert!(text.contains("Difficult"));
        assert!(text.contains("* selected MDE"));
    }
}
