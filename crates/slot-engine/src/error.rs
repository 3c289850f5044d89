//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A date or clock-time string did not have the expected shape.
    #[error("Invalid format: {0}")]
    Format(String),

    /// A range was inverted, or a value fell outside its allowed bounds.
    #[error("Out of range: {0}")]
    Range(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
