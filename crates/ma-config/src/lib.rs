mod backend_kind;
mod config;
mod error;
mod identity_config;
mod local_config;
mod log_level;
mod logging_config;
mod validation_config;

pub use backend_kind::BackendKind;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use identity_config::IdentityConfig;
pub use local_config::LocalConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use validation_config::ValidationConfig;

pub const CONFIG_DIR_ENV: &str = "MA_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".mindanchor";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_BACKEND: BackendKind = BackendKind::Local;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SESSION_FILE: &str = "session.json";

const DEFAULT_RECORD_KEY: &str = "mindanchor_user";
const MAX_RECORD_KEY_LENGTH: usize = 64;

const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;
const MIN_MIN_PASSWORD_LENGTH: usize = 6;
const MAX_MIN_PASSWORD_LENGTH: usize = 128;
const DEFAULT_MAX_EMAIL_LENGTH: usize = 254;
const MIN_MAX_EMAIL_LENGTH: usize = 6;
const MAX_MAX_EMAIL_LENGTH: usize = 320;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

#[cfg(test)]
mod tests;
