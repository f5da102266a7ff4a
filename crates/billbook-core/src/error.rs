//! Error types for billbook-core

use thiserror::Error;

use crate::api::ApiError;

/// Result type alias using billbook-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in billbook-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// REST backend or transport error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Form field that the resource does not define
    #[error("Unknown field '{field}' (expected one of: {expected})")]
    UnknownField { field: String, expected: String },

    /// Row action for a record that is not currently rendered
    #[error("No rendered row for id: {0}")]
    UnknownRow(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
