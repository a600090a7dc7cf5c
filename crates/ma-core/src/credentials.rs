//! Credential checks performed before any identity-provider call.

use crate::{AuthError, AuthResult, DEFAULT_MAX_EMAIL_LENGTH, DEFAULT_MIN_PASSWORD_LENGTH};

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").unwrap_or_else(|e| panic!("invalid email pattern: {e}"))
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Limits applied to credentials entered on the login and signup forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub min_password_length: usize,
    pub max_email_length: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            max_email_length: DEFAULT_MAX_EMAIL_LENGTH,
        }
    }
}

impl CredentialPolicy {
    /// Validate signup input. Email is checked before password.
    #[track_caller]
    pub fn validate_sign_up(&self, email: &str, password: &str) -> AuthResult<()> {
        self.validate_email(email)?;

        if password.chars().count() < self.min_password_length {
            return Err(AuthError::weak_password(self.min_password_length));
        }

        Ok(())
    }

    /// Validate login input: both fields present.
    #[track_caller]
    pub fn validate_sign_in(&self, email: &str, password: &str) -> AuthResult<()> {
        if email.trim().is_empty() {
            return Err(AuthError::invalid_email("Email is required"));
        }

        if password.is_empty() {
            return Err(AuthError::invalid_credentials());
        }

        Ok(())
    }

    #[track_caller]
    fn validate_email(&self, email: &str) -> AuthResult<()> {
        let email = email.trim();

        if email.is_empty() {
            return Err(AuthError::invalid_email("Email is required"));
        }

        if email.len() > self.max_email_length {
            return Err(AuthError::invalid_email(format!(
                "Email must not exceed {} characters",
                self.max_email_length
            )));
        }

        if !is_valid_email(email) {
            return Err(AuthError::invalid_email("Enter a valid email"));
        }

        Ok(())
    }
}
