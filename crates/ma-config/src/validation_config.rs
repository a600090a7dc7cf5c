use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_MAX_EMAIL_LENGTH, DEFAULT_MIN_PASSWORD_LENGTH,
    MAX_MAX_EMAIL_LENGTH, MAX_MIN_PASSWORD_LENGTH, MIN_MAX_EMAIL_LENGTH, MIN_MIN_PASSWORD_LENGTH,
};

use serde::Deserialize;

/// Credential limits enforced on the login and signup forms.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_password_length: usize,
    pub max_email_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            max_email_length: DEFAULT_MAX_EMAIL_LENGTH,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.min_password_length < MIN_MIN_PASSWORD_LENGTH
            || self.min_password_length > MAX_MIN_PASSWORD_LENGTH
        {
            return Err(ConfigError::validation(format!(
                "validation.min_password_length must be {}-{}, got {}",
                MIN_MIN_PASSWORD_LENGTH, MAX_MIN_PASSWORD_LENGTH, self.min_password_length
            )));
        }

        if self.max_email_length < MIN_MAX_EMAIL_LENGTH
            || self.max_email_length > MAX_MAX_EMAIL_LENGTH
        {
            return Err(ConfigError::validation(format!(
                "validation.max_email_length must be {}-{}, got {}",
                MIN_MAX_EMAIL_LENGTH, MAX_MAX_EMAIL_LENGTH, self.max_email_length
            )));
        }

        Ok(())
    }
}
