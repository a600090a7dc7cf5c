use crate::{ConfigError, ConfigErrorResult, DEFAULT_RECORD_KEY, MAX_RECORD_KEY_LENGTH};

use serde::Deserialize;

/// Settings for the single-record local backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Well-known key the record is stored under (`<key>.json`)
    pub record_key: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            record_key: String::from(DEFAULT_RECORD_KEY),
        }
    }
}

impl LocalConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.record_key.is_empty() || self.record_key.len() > MAX_RECORD_KEY_LENGTH {
            return Err(ConfigError::config(format!(
                "local.record_key must be 1-{} characters",
                MAX_RECORD_KEY_LENGTH
            )));
        }

        if !self
            .record_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::config(format!(
                "local.record_key may only contain letters, digits, '_' and '-', got {}",
                self.record_key
            )));
        }

        Ok(())
    }
}
