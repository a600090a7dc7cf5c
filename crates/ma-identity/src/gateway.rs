use crate::SessionSubscription;

use ma_core::{AuthResult, Profile, StoreResult};

use async_trait::async_trait;
use serde::Serialize;

/// An identity provider's assertion that an account is authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub identity_id: String,
    pub email: String,
}

/// Remote identity provider: credentials in, session-change notifications out.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// On success the session-change subscription receives `Active`.
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<()>;

    /// Create the identity. Returns it even when the provider withholds a
    /// session (for instance pending email confirmation).
    async fn sign_up(&self, email: &str, password: &str, name: Option<&str>)
    -> AuthResult<Session>;

    /// Drop the session locally first, then tell the provider. Never fails;
    /// provider errors are logged.
    async fn sign_out(&self);

    /// Restore a session persisted by an earlier run, if still valid.
    async fn restore_session(&self) -> AuthResult<Option<Session>>;

    /// Session currently held in memory. Used to discard stale hydrations.
    async fn current_session(&self) -> Option<Session>;

    /// Register the single observer of session changes.
    fn on_session_change(&self) -> AuthResult<SessionSubscription>;
}

/// Persisted profile records keyed by identity id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: &str) -> StoreResult<Option<Profile>>;

    async fn create(&self, profile: &Profile) -> StoreResult<()>;

    /// Mark the profile onboarded. Idempotent.
    async fn set_onboarded(&self, id: &str) -> StoreResult<()>;
}
