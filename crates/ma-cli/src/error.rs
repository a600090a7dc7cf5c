use ma_config::ConfigError;
use ma_identity::BackendError;
use ma_session::SessionError;

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Invalid argument: {message} {location}")]
    Usage {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    #[track_caller]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// JSON error document printed on failure.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Session(SessionError::Auth(e)) => json!({
                "error": {
                    "code": e.error_code(),
                    "message": e.user_message(),
                    "field": e.field(),
                    "retryable": e.is_retryable(),
                }
            }),
            Self::Session(e) => json!({
                "error": { "code": e.error_code(), "message": e.user_message() }
            }),
            Self::Usage { message, .. } => json!({
                "error": { "code": "USAGE", "message": message }
            }),
            other => json!({
                "error": { "code": "INTERNAL", "message": other.to_string() }
            }),
        }
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;
