use std::io;

use billbook_core::api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] billbook_core::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Expected FIELD=VALUE, got '{0}'")]
    InvalidAssignment(String),
    #[error("Record ID cannot be empty")]
    EmptyRecordId,
    #[error("Record not found for id: {0}")]
    RecordNotFound(String),
    #[error("Unknown command '{0}' (type 'help')")]
    UnknownCommand(String),
    #[error("Configuration error: {0}")]
    Config(String),
    /// Already shown to the user by the view.
    #[error(transparent)]
    Reported(billbook_core::Error),
}

impl CliError {
    pub const fn reported(error: billbook_core::Error) -> Self {
        Self::Reported(error)
    }

    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Reported(_))
    }
}
