use crate::{
    BackendKind, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, IdentityConfig, LocalConfig, LoggingConfig, ValidationConfig,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub identity: IdentityConfig,
    pub local: LocalConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for MA_CONFIG_DIR env var, else use ./.mindanchor/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply MA_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: MA_CONFIG_DIR env var > ./.mindanchor/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.identity.validate()?;
        self.local.validate()?;
        self.validation.validate()?;

        Ok(())
    }

    /// Absolute path of the session file: the remote token cache, or the
    /// local backend's signed-in marker.
    pub fn session_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.identity.session_file))
    }

    /// Absolute path of the local backend's single record.
    pub fn local_record_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(format!("{}.json", self.local.record_key)))
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");

        match self.identity.backend {
            BackendKind::Remote => info!(
                "  identity: remote {} (api key {}, timeout {}s, session cache {})",
                self.identity.url.as_deref().unwrap_or("<unset>"),
                if self.identity.api_key.is_some() {
                    "set"
                } else {
                    "missing"
                },
                self.identity.timeout_secs,
                self.identity.session_file
            ),
            BackendKind::Local => {
                info!("  identity: local record '{}'", self.local.record_key);
                warn!("  identity: local backend is a single-account development fallback");
            }
        }

        info!(
            "  validation: min password={}, max email={}",
            self.validation.min_password_length, self.validation.max_email_length
        );

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stderr")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Identity
        Self::apply_env_parse("MA_IDENTITY_BACKEND", &mut self.identity.backend);
        Self::apply_env_option_string("MA_IDENTITY_URL", &mut self.identity.url);
        Self::apply_env_option_string("MA_IDENTITY_API_KEY", &mut self.identity.api_key);
        Self::apply_env_parse("MA_IDENTITY_TIMEOUT_SECS", &mut self.identity.timeout_secs);
        Self::apply_env_string("MA_IDENTITY_SESSION_FILE", &mut self.identity.session_file);

        // Local
        Self::apply_env_string("MA_LOCAL_RECORD_KEY", &mut self.local.record_key);

        // Validation
        Self::apply_env_parse(
            "MA_VALIDATION_MIN_PASSWORD_LENGTH",
            &mut self.validation.min_password_length,
        );
        Self::apply_env_parse(
            "MA_VALIDATION_MAX_EMAIL_LENGTH",
            &mut self.validation.max_email_length,
        );

        // Logging
        Self::apply_env_parse("MA_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MA_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MA_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
