use crate::{
    BackendKind, ConfigError, ConfigErrorResult, DEFAULT_BACKEND, DEFAULT_SESSION_FILE,
    DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub backend: BackendKind,
    /// Identity provider base URL (remote backend)
    pub url: Option<String>,
    /// Project API key sent as the `apikey` header (remote backend)
    pub api_key: Option<String>,
    /// Per-request transport timeout
    pub timeout_secs: u64,
    /// Session file (remote token cache or local signed-in marker), relative to the config directory
    pub session_file: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND,
            url: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_file: String::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl IdentityConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::identity(format!(
                "identity.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if Path::new(&self.session_file).is_absolute() || self.session_file.contains("..") {
            return Err(ConfigError::identity(
                "identity.session_file must be relative and cannot contain '..'",
            ));
        }

        if self.backend == BackendKind::Remote {
            let url = self.url.as_deref().unwrap_or_default();
            if url.is_empty() {
                return Err(ConfigError::identity(
                    "identity.url is required when backend = \"remote\"",
                ));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::identity(format!(
                    "identity.url must start with http:// or https://, got {url}"
                )));
            }

            if self.api_key.as_deref().is_none_or(str::is_empty) {
                return Err(ConfigError::identity(
                    "identity.api_key is required when backend = \"remote\"",
                ));
            }
        }

        Ok(())
    }
}
