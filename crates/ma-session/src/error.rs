use ma_core::{AuthError, CoreError};

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("No signed-in user {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error(transparent)]
    InvalidAnswer(#[from] CoreError),
}

impl SessionError {
    #[track_caller]
    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.error_code(),
            Self::NotAuthenticated { .. } => "NOT_AUTHENTICATED",
            Self::InvalidAnswer(_) => "INVALID_ANSWER",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(e) => e.user_message(),
            Self::NotAuthenticated { .. } => String::from("Please sign in first."),
            Self::InvalidAnswer(e) => match e {
                CoreError::InvalidAnswer { message, .. } => message.clone(),
                CoreError::UnknownQuestion { question_id, .. } => {
                    format!("Unknown question '{question_id}'")
                }
            },
        }
    }
}

pub type Result<T> = StdResult<T, SessionError>;
