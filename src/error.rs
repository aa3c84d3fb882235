//! Error types for the Beamtenpension engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition under which a pension calculation is refused.

use chrono::NaiveDate;
use thiserror::Error;

/// The broad category an [`EngineError`] belongs to.
///
/// Callers that only need to decide how to present a failure can match on
/// the kind instead of on every individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input, detected before any calculation stage.
    Validation,
    /// Dates that contradict each other or lie in the past.
    TemporalInconsistency,
    /// The salary table does not know the requested combination.
    Lookup,
    /// Reference data could not be loaded.
    Configuration,
}

/// The main error type for the Beamtenpension engine.
///
/// # Example
///
/// ```
/// use beamtenpension_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::Validation {
///     field: "experience_step".to_string(),
///     message: "must be between 1 and 12, got 13".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid input field 'experience_step': must be between 1 and 12, got 13"
/// );
/// assert_eq!(error.kind(), ErrorKind::Validation);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input field was malformed or out of range.
    #[error("Invalid input field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The retirement date is not strictly after the service-entry date.
    #[error(
        "Service time must be positive: entry date {entry_date} is not before retirement date {retirement_date}"
    )]
    NonPositiveServiceTime {
        /// The date service started.
        entry_date: NaiveDate,
        /// The projected retirement date.
        retirement_date: NaiveDate,
    },

    /// The requested retirement age has already been reached.
    #[error("Retirement age {retirement_age} lies in the past (current age {current_age})")]
    RetirementInPast {
        /// The requested retirement age.
        retirement_age: u32,
        /// The age on the valuation date.
        current_age: i32,
    },

    /// The birth date lies after the valuation date.
    #[error("Birth date {birth_date} lies after the valuation date {valuation_date}")]
    BirthAfterValuation {
        /// The birth date of the profile.
        birth_date: NaiveDate,
        /// The date the calculation is made for.
        valuation_date: NaiveDate,
    },

    /// No base salary exists for the given combination.
    #[error(
        "No base salary for pay grade '{pay_grade}' step {experience_step} in state '{state}'"
    )]
    SalaryNotFound {
        /// The state whose table was searched.
        state: String,
        /// The requested pay grade.
        pay_grade: String,
        /// The requested experience step.
        experience_step: u8,
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
}

impl EngineError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation { .. } => ErrorKind::Validation,
            EngineError::NonPositiveServiceTime { .. }
            | EngineError::RetirementInPast { .. }
            | EngineError::BirthAfterValuation { .. } => ErrorKind::TemporalInconsistency,
            EngineError::SalaryNotFound { .. } => ErrorKind::Lookup,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Configuration
            }
        }
    }

    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
