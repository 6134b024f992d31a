//! Typed errors for mailmetrics operations.
//!
//! The calculation engines themselves never fail: degenerate inputs produce
//! degenerate numbers (zero ROAS, infinite sample size), not errors. Errors
//! exist only at the boundaries: reading configuration, writing reports, and
//! validating user-supplied inputs before they reach an engine.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the library surface.
#[derive(Debug, Error)]
pub enum MailmetricsError {
    /// Configuration file could not be read or parsed.
    #[error("config error: {message}{}", path_suffix(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Report output could not be written.
    #[error("failed to write report")]
    Io(#[from] std::io::Error),

    /// User-supplied input failed boundary validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl MailmetricsError {
    /// Create a config error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a config error with a message and path context.
    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Whether the user can fix this error by correcting their input.
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Validation(_))
    }
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" ({})", p.display()),
        None => String::new(),
    }
}

/// Field-level validation failures for calculator inputs.
///
/// The engines accept whatever they are given (matching the permissive
/// numeric contract of the calculators), so these are raised only by the
/// CLI/config boundary and by explicit `validate` calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A proportion field fell outside [0, 1].
    #[error("{field} must be a proportion within [0, 1], got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },

    /// A count or currency field was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    /// The minimum detectable effect must be strictly positive to be testable.
    #[error("mde must be greater than zero, got {value}")]
    NonPositiveMde { value: f64 },

    /// NaN or infinite input.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

impl ValidationError {
    /// Validate that a value is a proportion within [0, 1].
    pub fn check_rate(field: &'static str, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::RateOutOfRange { field, value });
        }
        Ok(())
    }

    /// Validate that a value is finite and non-negative.
    pub fn check_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeAmount { field, value });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rate_accepts_bounds() {
        assert!(ValidationError::check_rate("close_rate", 0.0).is_ok());
        assert!(ValidationError::check_rate("close_rate", 1.0).is_ok());
        assert!(ValidationError::check_rate("close_rate", 0.75).is_ok());
    }

    #[test]
    fn test_check_rate_rejects_out_of_range() {
        let err = ValidationError::check_rate("contract_rate", 1.5).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RateOutOfRange {
                field: "contract_rate",
                value: 1.5
            }
        );
        assert!(ValidationError::check_rate("contract_rate", -0.1).is_err());
    }

    #[test]
    fn test_check_amount_rejects_nan() {
        let err = ValidationError::check_amount("mail_pieces", f64::NAN).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonFinite {
                field: "mail_pieces"
            }
        );
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ValidationError::check_amount("cost_per_piece", -1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cost_per_piece must be non-negative, got -1"
        );
    }

    #[test]
    fn test_user_fixable_classification() {
        assert!(MailmetricsError::config("bad toml").is_user_fixable());
        let io: MailmetricsError = std::io::Error::other("disk full").into();
        assert!(!io.is_user_fixable());
    }
}
