//! Error types for schedule-client operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Local validation failed before anything was sent.
    #[error(transparent)]
    Engine(#[from] slot_engine::SlotError),

    /// The session has no exclusion with this id in its current list.
    #[error("Unknown exclusion id: {0}")]
    UnknownExclusion(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
