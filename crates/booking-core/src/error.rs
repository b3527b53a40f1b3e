//! Input validation errors.

use thiserror::Error;

/// A required field was missing or a value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("booking starts at {from} but ends at {to}")]
    InvertedWindow { from: String, to: String },
}
