use crate::StoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures surfaced by sign-in, sign-up and session hydration.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Invalid email: {message} {location}")]
    InvalidEmail {
        message: String,
        location: ErrorLocation,
    },

    #[error("Password must be at least {min_length} characters {location}")]
    WeakPassword {
        min_length: usize,
        location: ErrorLocation,
    },

    #[error("Account already exists for {email} {location}")]
    Conflict {
        email: String,
        location: ErrorLocation,
    },

    #[error("Network failure: {message} {location}")]
    NetworkFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Profile write failed: {message} {location}")]
    ProfileWriteFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Profile read failed: {message} {location}")]
    ProfileReadFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("A session-change subscription is already live {location}")]
    AlreadySubscribed { location: ErrorLocation },
}

impl AuthError {
    #[track_caller]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_email(message: impl Into<String>) -> Self {
        Self::InvalidEmail {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn weak_password(min_length: usize) -> Self {
        Self::WeakPassword {
            min_length,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn profile_write(message: impl Into<String>) -> Self {
        Self::ProfileWriteFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn profile_read(message: impl Into<String>) -> Self {
        Self::ProfileReadFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_subscribed() -> Self {
        Self::AlreadySubscribed {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::InvalidEmail { .. } => "INVALID_EMAIL",
            Self::WeakPassword { .. } => "WEAK_PASSWORD",
            Self::Conflict { .. } => "CONFLICT",
            Self::NetworkFailure { .. } => "NETWORK_FAILURE",
            Self::ProfileWriteFailure { .. } => "PROFILE_WRITE_FAILURE",
            Self::ProfileReadFailure { .. } => "PROFILE_READ_FAILURE",
            Self::AlreadySubscribed { .. } => "ALREADY_SUBSCRIBED",
        }
    }

    /// Errors the initiating form shows next to a field and recovers from locally.
    pub fn is_field_error(&self) -> bool {
        self.field().is_some()
    }

    /// Form field the error belongs to.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidEmail { .. } | Self::Conflict { .. } => Some("email"),
            Self::InvalidCredentials { .. } | Self::WeakPassword { .. } => Some("password"),
            _ => None,
        }
    }

    /// Whether the user can simply try again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure { .. }
                | Self::ProfileWriteFailure { .. }
                | Self::ProfileReadFailure { .. }
        )
    }

    /// Message shown to the user. Never includes locations or provider detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials { .. } => String::from("Invalid email or password"),
            Self::InvalidEmail { message, .. } => message.clone(),
            Self::WeakPassword { min_length, .. } => format!("At least {min_length} characters"),
            Self::Conflict { .. } => String::from("An account with this email already exists"),
            Self::NetworkFailure { .. } => {
                String::from("Something went wrong reaching the server. Please try again.")
            }
            Self::ProfileWriteFailure { .. } => {
                String::from("We couldn't finish setting up your account. Please try again.")
            }
            Self::ProfileReadFailure { .. } => String::from("We couldn't load your profile."),
            Self::AlreadySubscribed { .. } => String::from("Internal session error."),
        }
    }
}

impl From<StoreError> for AuthError {
    #[track_caller]
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Read { message, .. } => Self::profile_read(message),
            StoreError::Write { message, .. } => Self::profile_write(message),
        }
    }
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;
