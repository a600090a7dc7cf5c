//! Backend selection from configuration.

use crate::{IdentityGateway, ProfileStore, RemoteIdentityGateway, local_backend, remote_backend};

use ma_config::{BackendKind, Config, ConfigError};
use ma_core::{AuthError, AuthResult, CredentialPolicy};

use std::sync::Arc;
use std::time::Duration;

use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] AuthError),
}

/// The identity gateway and profile store chosen at startup.
#[derive(Clone)]
pub struct Backend {
    pub kind: BackendKind,
    pub gateway: Arc<dyn IdentityGateway>,
    pub profiles: Arc<dyn ProfileStore>,
    remote: Option<Arc<RemoteIdentityGateway>>,
}

impl Backend {
    /// Whether the held session is still valid. Only the remote provider can
    /// expire a session; a local session lasts until sign-out.
    pub async fn check_session(&self) -> AuthResult<bool> {
        match &self.remote {
            Some(remote) => remote.check_session().await,
            None => Ok(self.gateway.current_session().await.is_some()),
        }
    }
}

/// Credential limits from the `[validation]` section.
pub fn credential_policy(config: &Config) -> CredentialPolicy {
    CredentialPolicy {
        min_password_length: config.validation.min_password_length,
        max_email_length: config.validation.max_email_length,
    }
}

/// Build the configured backend. Expects a validated config.
pub fn build_backend(config: &Config) -> Result<Backend, BackendError> {
    let policy = credential_policy(config);

    match config.identity.backend {
        BackendKind::Remote => {
            let url = config.identity.url.as_deref().ok_or_else(|| {
                ConfigError::identity("identity.url is required when backend = \"remote\"")
            })?;
            let api_key = config.identity.api_key.as_deref().ok_or_else(|| {
                ConfigError::identity("identity.api_key is required when backend = \"remote\"")
            })?;

            let (gateway, profiles) = remote_backend(
                url,
                api_key,
                Duration::from_secs(config.identity.timeout_secs),
                config.session_path()?,
                policy,
            )?;
            let gateway = Arc::new(gateway);

            info!("Using remote identity provider at {url}");
            Ok(Backend {
                kind: BackendKind::Remote,
                gateway: Arc::clone(&gateway) as Arc<dyn IdentityGateway>,
                profiles: Arc::new(profiles),
                remote: Some(gateway),
            })
        }
        BackendKind::Local => {
            let (gateway, profiles) = local_backend(
                config.local_record_path()?,
                config.session_path()?,
                policy,
            );

            info!("Using local single-account backend");
            Ok(Backend {
                kind: BackendKind::Local,
                gateway: Arc::new(gateway),
                profiles: Arc::new(profiles),
                remote: None,
            })
        }
    }
}
