//! Error types for the wage engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading legal parameters
//! or running a wage, tax or severance calculation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the wage engine.
///
/// All fallible operations in the engine return this error type. Calculations
/// reject invalid input before computing anything, so an error never comes
/// with a partial result.
///
/// # Example
///
/// ```
/// use wage_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/jurisdiction.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/jurisdiction.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A legal parameter set violates one of its invariants.
    #[error("Invalid legal parameters effective {effective_date}: {message}")]
    InvalidParameters {
        /// The effective date of the offending parameter set.
        effective_date: NaiveDate,
        /// A description of the violated invariant.
        message: String,
    },

    /// No legal parameter set is effective on the requested date.
    #[error("No legal parameters effective on {date}")]
    ParametersNotFound {
        /// The date for which parameters were requested.
        date: NaiveDate,
    },

    /// A calculation input was rejected before any computation ran.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        /// The name of the rejected input.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidArgument`].
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
