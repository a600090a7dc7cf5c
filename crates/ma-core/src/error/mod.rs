mod auth_error;
mod store_error;

pub use auth_error::{AuthError, AuthResult};
pub use store_error::{StoreError, StoreResult};

// -------------------------------------------------------------------------- //

use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid answer for '{question_id}': {message} {location}")]
    InvalidAnswer {
        question_id: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown question: {question_id} {location}")]
    UnknownQuestion {
        question_id: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
