use crate::remote::client::ApiResponse;
use crate::remote::provider_error::{Endpoint, classify, provider_message};
use crate::remote::{CachedSession, RemoteState};
use crate::{IdentityGateway, Session, SessionChange, SessionSubscription};

use ma_core::{AuthError, AuthResult, CredentialPolicy};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Token grant and signup replies. Signup without a session (confirmation
/// pending) returns the bare user instead of `{ access_token, user }`.
#[derive(Debug, Deserialize)]
struct AuthReply {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<ProviderUser>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl AuthReply {
    fn parse(response: ApiResponse) -> AuthResult<Self> {
        serde_json::from_value(response.body)
            .map_err(|e| AuthError::network(format!("unexpected provider reply: {e}")))
    }

    fn identity(&self, fallback_email: &str) -> Option<Session> {
        let (id, email) = match &self.user {
            Some(user) => (Some(&user.id), user.email.as_ref()),
            None => (self.id.as_ref(), self.email.as_ref()),
        };

        id.map(|id| Session {
            identity_id: id.clone(),
            email: email.cloned().unwrap_or_else(|| fallback_email.to_string()),
        })
    }
}

pub struct RemoteIdentityGateway {
    state: Arc<RemoteState>,
    policy: CredentialPolicy,
}

impl RemoteIdentityGateway {
    pub(crate) fn new(state: Arc<RemoteState>, policy: CredentialPolicy) -> Self {
        Self { state, policy }
    }

    /// Ask the provider whether the held session is still valid.
    ///
    /// An expired or revoked session is dropped and `Ended` is published.
    /// Returns whether a valid session remains.
    pub async fn check_session(&self) -> AuthResult<bool> {
        let Some(token) = self.state.access_token().await else {
            return Ok(false);
        };

        match self.fetch_user(&token).await? {
            Some(_) => Ok(true),
            None => {
                info!("Session expired or revoked by the provider");
                self.drop_session().await;
                self.state.notifier.publish(SessionChange::Ended);
                Ok(false)
            }
        }
    }

    /// `GET /auth/v1/user`. `None` when the token is rejected.
    async fn fetch_user(&self, token: &str) -> AuthResult<Option<ProviderUser>> {
        let client = &self.state.client;
        let url = client.url("/auth/v1/user", &[])?;
        let response = client
            .execute(client.request(Method::GET, url, Some(token)))
            .await?;

        let status = response.status;

        if status.is_success() {
            serde_json::from_value(response.body)
                .map(Some)
                .map_err(|e| AuthError::network(format!("unexpected user reply: {e}")))
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Ok(None)
        } else {
            Err(AuthError::network(format!(
                "provider returned {status}: {}",
                provider_message(&response.body)
            )))
        }
    }

    async fn store_session(&self, cached: CachedSession) {
        let mut saved = self.state.cache.save(&cached);
        if let Err(e) = &saved
            && e.is_transient()
        {
            debug!("Retrying session cache write: {e}");
            saved = self.state.cache.save(&cached);
        }

        if let Err(e) = saved {
            // Still signed in for this run; the next start will ask for credentials.
            warn!("Failed to cache session: {e} ({})", e.recovery_hint());
        }

        let identity_id = cached.identity_id.clone();
        *self.state.session.write().await = Some(cached);
        self.state
            .notifier
            .publish(SessionChange::active(identity_id));
    }

    async fn drop_session(&self) -> Option<CachedSession> {
        let previous = self.state.session.write().await.take();

        if let Err(e) = self.state.cache.remove() {
            warn!("Failed to clear cached session: {e} ({})", e.recovery_hint());
        }

        previous
    }
}

#[async_trait]
impl IdentityGateway for RemoteIdentityGateway {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<()> {
        self.policy.validate_sign_in(email, password)?;
        let email = email.trim();

        let client = &self.state.client;
        let url = client.url("/auth/v1/token", &[("grant_type", "password")])?;
        let request = client
            .request(Method::POST, url, None)
            .json(&json!({ "email": email, "password": password }));
        let response = client.execute(request).await?;

        if !response.status.is_success() {
            debug!("Sign-in rejected with {}", response.status);
            return Err(classify(
                &response,
                Endpoint::SignIn,
                email,
                self.policy.min_password_length,
            ));
        }

        let reply = AuthReply::parse(response)?;
        let (Some(session), Some(access_token)) =
            (reply.identity(email), reply.access_token.clone())
        else {
            return Err(AuthError::network("token reply without session"));
        };

        self.store_session(CachedSession {
            identity_id: session.identity_id,
            email: session.email,
            access_token,
            refresh_token: reply.refresh_token,
            saved_at: Utc::now(),
        })
        .await;

        info!("Signed in");
        Ok(())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> AuthResult<Session> {
        self.policy.validate_sign_up(email, password)?;
        let email = email.trim();

        let mut body = json!({ "email": email, "password": password });
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            body["data"] = json!({ "name": name });
        }

        let client = &self.state.client;
        let url = client.url("/auth/v1/signup", &[])?;
        let response = client
            .execute(client.request(Method::POST, url, None).json(&body))
            .await?;

        if !response.status.is_success() {
            debug!("Sign-up rejected with {}", response.status);
            return Err(classify(
                &response,
                Endpoint::SignUp,
                email,
                self.policy.min_password_length,
            ));
        }

        let reply = AuthReply::parse(response)?;
        let Some(session) = reply.identity(email) else {
            return Err(AuthError::network("signup reply without user"));
        };

        match reply.access_token {
            Some(access_token) => {
                self.store_session(CachedSession {
                    identity_id: session.identity_id.clone(),
                    email: session.email.clone(),
                    access_token,
                    refresh_token: reply.refresh_token,
                    saved_at: Utc::now(),
                })
                .await;
                info!("Created account");
            }
            None => info!("Created account; provider withheld a session"),
        }

        Ok(session)
    }

    async fn sign_out(&self) {
        let previous = self.drop_session().await;
        self.state.notifier.publish(SessionChange::Ended);

        let Some(previous) = previous else {
            debug!("Sign-out without a session");
            return;
        };

        let client = &self.state.client;
        let result = match client.url("/auth/v1/logout", &[]) {
            Ok(url) => {
                client
                    .execute(client.request(Method::POST, url, Some(previous.access_token.as_str())))
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(response) if response.status.is_success() => info!("Signed out"),
            Ok(response) => warn!(
                "Provider rejected sign-out with {}; signed out locally",
                response.status
            ),
            Err(e) => warn!("Provider sign-out failed: {e}; signed out locally"),
        }
    }

    async fn restore_session(&self) -> AuthResult<Option<Session>> {
        let cached = self
            .state
            .cache
            .load_or_discard::<CachedSession>()
            .map_err(|e| AuthError::network(e.to_string()))?;

        let Some(mut cached) = cached else {
            return Ok(None);
        };

        match self.fetch_user(&cached.access_token).await? {
            Some(user) => {
                cached.identity_id = user.id;
                if let Some(email) = user.email {
                    cached.email = email;
                }

                let session = cached.session();
                *self.state.session.write().await = Some(cached);
                debug!("Restored cached session");
                Ok(Some(session))
            }
            None => {
                info!("Cached session is no longer valid");
                self.drop_session().await;
                Ok(None)
            }
        }
    }

    async fn current_session(&self) -> Option<Session> {
        self.state
            .session
            .read()
            .await
            .as_ref()
            .map(CachedSession::session)
    }

    fn on_session_change(&self) -> AuthResult<SessionSubscription> {
        self.state.notifier.subscribe()
    }
}
