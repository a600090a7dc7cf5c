use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors from a profile store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Profile read error: {message} {location}")]
    Read {
        message: String,
        location: ErrorLocation,
    },

    #[error("Profile write error: {message} {location}")]
    Write {
        message: String,
        location: ErrorLocation,
    },
}

impl StoreError {
    #[track_caller]
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
