use crate::{SessionError, SessionStore};

use ma_core::{AuthError, Profile, User};
use ma_identity::{IdentityGateway, ProfileStore, SessionChange};

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::Mutex;

/// The only writer of the [`SessionStore`].
///
/// Hydrate-or-clear runs are serialized: each reaches a stable store value
/// before the next begins.
#[derive(Clone)]
pub struct SessionController {
    gateway: Arc<dyn IdentityGateway>,
    profiles: Arc<dyn ProfileStore>,
    store: SessionStore,
    hydration: Arc<Mutex<()>>,
}

impl SessionController {
    pub fn new(
        gateway: Arc<dyn IdentityGateway>,
        profiles: Arc<dyn ProfileStore>,
        store: SessionStore,
    ) -> Self {
        Self {
            gateway,
            profiles,
            store,
            hydration: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn gateway(&self) -> &Arc<dyn IdentityGateway> {
        &self.gateway
    }

    /// Authenticate. The user is populated by the session-change listener, not here.
    pub async fn sign_in(&self, email: &str, password: &str) -> crate::Result<()> {
        self.gateway.sign_in(email, password).await?;
        Ok(())
    }

    /// Create the identity, then its profile with `onboarded = false`, then hydrate.
    ///
    /// A failed profile write leaves the identity without a profile; that account
    /// hydrates as no user, and signing up again reports `Conflict`.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> crate::Result<()> {
        let session = self.gateway.sign_up(email, password, name).await?;
        let profile = Profile::new(
            session.identity_id.clone(),
            session.email.clone(),
            name.map(str::to_string),
        );

        if let Err(e) = self.profiles.create(&profile).await {
            warn!("Identity created but its profile could not be written: {e}");
            return Err(AuthError::profile_write(e.to_string()).into());
        }

        info!("Created profile for new account");
        self.apply_change(&SessionChange::active(session.identity_id))
            .await;
        Ok(())
    }

    /// Clear the store immediately, then end the provider session. Never fails.
    pub async fn sign_out(&self) {
        self.store.clear();
        self.gateway.sign_out().await;
    }

    /// Hydrate for an active session or clear for an ended one.
    pub async fn apply_change(&self, change: &SessionChange) {
        let _guard = self.hydration.lock().await;

        match change.identity_id() {
            Some(identity_id) => self.hydrate_locked(identity_id).await,
            None => {
                debug!("Session ended; clearing user");
                self.store.clear();
            }
        }
    }

    /// Combine the live session with its profile. Missing or unreadable
    /// profiles resolve to no user.
    async fn hydrate_locked(&self, identity_id: &str) {
        let epoch = self.store.epoch();
        let result = self.profiles.get(identity_id).await;

        let current = self.gateway.current_session().await;
        if current.as_ref().map(|s| s.identity_id.as_str()) != Some(identity_id) {
            debug!("Discarding hydration for a session that is no longer current");
            return;
        }

        let applied = match result {
            Ok(Some(profile)) => self.store.set_if_epoch(epoch, User::from_profile(profile)),
            Ok(None) => {
                warn!("Session has no profile record; treating as signed out");
                self.store.clear_if_epoch(epoch)
            }
            Err(e) => {
                warn!(
                    "{}; treating as signed out",
                    AuthError::profile_read(e.to_string())
                );
                self.store.clear_if_epoch(epoch)
            }
        };

        if !applied {
            debug!("Discarding hydration: store was cleared while it ran");
        }
    }

    /// Mark the signed-in user onboarded: durable write first, then the store.
    ///
    /// Idempotent. A failed write leaves the store untouched and is returned.
    pub async fn complete_onboarding(&self) -> crate::Result<User> {
        let _guard = self.hydration.lock().await;

        let Some(user) = self.store.user() else {
            return Err(SessionError::not_authenticated());
        };

        self.profiles
            .set_onboarded(&user.id)
            .await
            .map_err(AuthError::from)?;

        let onboarded = user.onboarded();
        if self.store.replace_user(onboarded.clone()) {
            info!("Onboarding complete");
        } else {
            debug!("User changed while onboarding completed; store left as is");
        }

        Ok(onboarded)
    }
}
