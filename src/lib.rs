// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod funnel;
pub mod io;
pub mod rating;
pub mod sample_size;

// Re-export commonly used types
pub use crate::errors::{MailmetricsError, ValidationError};

pub use crate::funnel::{
    calculate_all, Assumptions, CalculationResults, ClosedDealsRow, ContractRateRow, ContractsRow,
    GrossLeadsRow, NetLeadsRow, BASE_RESPONSE_RATE,
};

pub use crate::sample_size::{
    calculate_all_results, generate_mde_sensitivity_table, MdeSensitivityRow, Power,
    SampleSizeInputs, SampleSizeResults, Significance,
};

pub use crate::formatting::{
    format_currency, format_mde, format_number, format_percent, format_roas, PLACEHOLDER,
};

pub use crate::rating::{RoasRating, SampleSizeRating};

pub use crate::io::{create_writer, OutputFormat, Report, ReportWriter};
