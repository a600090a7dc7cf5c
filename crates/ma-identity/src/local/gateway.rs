use crate::local::{LocalRecord, LocalState, SessionMarker};
use crate::{IdentityGateway, Session, SessionChange, SessionSubscription};

use ma_core::{AuthError, AuthResult, CredentialPolicy};

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

pub struct LocalIdentityGateway {
    state: Arc<LocalState>,
    policy: CredentialPolicy,
}

impl LocalIdentityGateway {
    pub(crate) fn new(state: Arc<LocalState>, policy: CredentialPolicy) -> Self {
        Self { state, policy }
    }

    fn load_record(&self) -> AuthResult<Option<LocalRecord>> {
        self.state
            .record
            .load_or_discard::<LocalRecord>()
            .map_err(|e| AuthError::profile_read(e.to_string()))
    }

    async fn start_session(&self, email: &str) -> Session {
        let marker = SessionMarker::new(email);
        if let Err(e) = self.state.marker.save(&marker) {
            // Still signed in for this run; the next start will ask for credentials.
            warn!("Failed to save local session marker: {e} ({})", e.recovery_hint());
        }

        let session = marker.session();
        *self.state.session.write().await = Some(session.clone());
        self.state
            .notifier
            .publish(SessionChange::active(email.to_string()));

        session
    }

    fn clear_marker(&self) {
        if let Err(e) = self.state.marker.remove() {
            warn!("Failed to clear local session marker: {e} ({})", e.recovery_hint());
        }
    }
}

#[async_trait]
impl IdentityGateway for LocalIdentityGateway {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<()> {
        self.policy.validate_sign_in(email, password)?;
        debug!("Local backend does not verify passwords");

        match self.load_record()? {
            Some(record) if record.matches(email) => {
                self.start_session(&record.email).await;
                info!("Signed in local account");
                Ok(())
            }
            _ => Err(AuthError::invalid_credentials()),
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _name: Option<&str>,
    ) -> AuthResult<Session> {
        self.policy.validate_sign_up(email, password)?;
        let email = email.trim();

        if let Some(existing) = self.load_record()? {
            if existing.matches(email) {
                return Err(AuthError::conflict(email));
            }
            warn!("Replacing the existing local account (single-account backend)");
        }

        let session = self.start_session(email).await;
        info!("Created local account");
        Ok(session)
    }

    async fn sign_out(&self) {
        *self.state.session.write().await = None;
        self.clear_marker();

        self.state.notifier.publish(SessionChange::Ended);
        info!("Signed out local account");
    }

    async fn restore_session(&self) -> AuthResult<Option<Session>> {
        let marker = self
            .state
            .marker
            .load_or_discard::<SessionMarker>()
            .map_err(|e| AuthError::profile_read(e.to_string()))?;
        let Some(marker) = marker else {
            return Ok(None);
        };

        // A marker left behind by a replaced account is stale.
        if !self
            .load_record()?
            .is_some_and(|record| record.matches(&marker.email))
        {
            debug!("Local session marker has no matching account; discarding");
            self.clear_marker();
            return Ok(None);
        }

        let session = marker.session();
        *self.state.session.write().await = Some(session.clone());

        Ok(Some(session))
    }

    async fn current_session(&self) -> Option<Session> {
        self.state.session.read().await.clone()
    }

    fn on_session_change(&self) -> AuthResult<SessionSubscription> {
        self.state.notifier.subscribe()
    }
}
