//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax configuration
//! or calculating a salary breakdown.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the salary engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/taxes.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/taxes.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A monetary input was outside its allowed range.
    #[error("Invalid amount for '{field}': {amount}")]
    InvalidAmount {
        /// The input that was rejected (e.g. "salary").
        field: String,
        /// The rejected value.
        amount: Decimal,
    },

    /// A rounding granularity was zero or negative.
    #[error("Rounding granularity must be greater than zero, got {to_nearest}")]
    InvalidRoundingGranularity {
        /// The rejected granularity.
        to_nearest: Decimal,
    },

    /// An amount could not be rounded to the granularity without
    /// overflowing the decimal range.
    #[error("Cannot round {amount} to the nearest {to_nearest}: decimal overflow")]
    RoundingOverflow {
        /// The amount being rounded.
        amount: Decimal,
        /// The granularity it was rounded to.
        to_nearest: Decimal,
    },

    /// A rate was outside the closed interval [0, 1].
    #[error("Rate '{field}' must be between 0 and 1, got {rate}")]
    InvalidRate {
        /// The configuration field holding the rate.
        field: String,
        /// The rejected rate.
        rate: Decimal,
    },

    /// A tax definition carried an unusable bracket set.
    #[error("Invalid brackets for tax '{tax}': {message}")]
    InvalidBrackets {
        /// The name of the tax definition.
        tax: String,
        /// A description of what is wrong with the brackets.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Two configuration records share an id.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId {
        /// The kind of record ("tax" or "social security").
        kind: String,
        /// The duplicated id.
        id: u32,
    },

    /// No tax definition exists with the requested id.
    #[error("Tax with id {id} not found")]
    TaxNotFound {
        /// The requested id.
        id: u32,
    },

    /// No social security definition exists with the requested id.
    #[error("Social security with id {id} not found")]
    SocialSecurityNotFound {
        /// The requested id.
        id: u32,
    },

    /// No tax id was given and no default tax is configured.
    #[error("No tax id provided and no default tax id set")]
    NoDefaultTax,

    /// No social security id was given and no default is configured.
    #[error("No social security id provided and no default social security id set")]
    NoDefaultSocialSecurity,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/taxes.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/taxes.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_amount_displays_field_and_amount() {
        let error = EngineError::InvalidAmount {
            field: "salary".to_string(),
            amount: dec("-5"),
        };
        assert_eq!(error.to_string(), "Invalid amount for 'salary': -5");
    }

    #[test]
    fn test_invalid_rounding_granularity_displays_value() {
        let error = EngineError::InvalidRoundingGranularity {
            to_nearest: Decimal::ZERO,
        };
        assert_eq!(
            error.to_string(),
            "Rounding granularity must be greater than zero, got 0"
        );
    }

    #[test]
    fn test_rounding_overflow_displays_amount_and_granularity() {
        let error = EngineError::RoundingOverflow {
            amount: dec("1000000000"),
            to_nearest: dec("0.00000000000000000001"),
        };
        assert_eq!(
            error.to_string(),
            "Cannot round 1000000000 to the nearest 0.00000000000000000001: decimal overflow"
        );
    }

    #[test]
    fn test_invalid_brackets_displays_tax_and_message() {
        let error = EngineError::InvalidBrackets {
            tax: "income tax".to_string(),
            message: "bracket 2 overlaps bracket 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid brackets for tax 'income tax': bracket 2 overlaps bracket 1"
        );
    }

    #[test]
    fn test_lookup_errors_display_ids() {
        assert_eq!(
            EngineError::TaxNotFound { id: 7 }.to_string(),
            "Tax with id 7 not found"
        );
        assert_eq!(
            EngineError::SocialSecurityNotFound { id: 3 }.to_string(),
            "Social security with id 3 not found"
        );
        assert_eq!(
            EngineError::NoDefaultTax.to_string(),
            "No tax id provided and no default tax id set"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_no_default() -> EngineResult<()> {
            Err(EngineError::NoDefaultTax)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_no_default()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
