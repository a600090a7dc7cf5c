//! Hosted identity provider (GoTrue-style auth endpoints plus a
//! PostgREST-style `profiles` table).

mod cached_session;
mod client;
mod gateway;
mod profile_store;
mod provider_error;

pub use cached_session::CachedSession;
pub use gateway::RemoteIdentityGateway;
pub use profile_store::RemoteProfileStore;

use crate::remote::client::AuthClient;
use crate::{JsonFile, SessionNotifier};

use ma_core::{AuthResult, CredentialPolicy};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

pub(crate) struct RemoteState {
    pub(crate) client: AuthClient,
    pub(crate) cache: JsonFile,
    pub(crate) session: RwLock<Option<CachedSession>>,
    pub(crate) notifier: SessionNotifier,
}

impl RemoteState {
    pub(crate) async fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }
}

/// Build the remote gateway and profile store sharing one HTTP client and session.
pub fn remote_backend(
    base_url: &str,
    api_key: &str,
    timeout: Duration,
    session_cache: impl Into<PathBuf>,
    policy: CredentialPolicy,
) -> AuthResult<(RemoteIdentityGateway, RemoteProfileStore)> {
    let state = Arc::new(RemoteState {
        client: AuthClient::new(base_url, api_key, timeout)?,
        cache: JsonFile::new(session_cache),
        session: RwLock::new(None),
        notifier: SessionNotifier::new(),
    });

    Ok((
        RemoteIdentityGateway::new(Arc::clone(&state), policy),
        RemoteProfileStore::new(state),
    ))
}
