//! In-memory identity provider and profile store with failure switches and
//! a gate for holding profile reads open.

#![allow(dead_code)]

use ma_core::{AuthError, AuthResult, CredentialPolicy, Profile, StoreError, StoreResult};
use ma_identity::{
    IdentityGateway, ProfileStore, Session, SessionChange, SessionNotifier, SessionSubscription,
};
use ma_session::{SessionController, SessionStore};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

pub const EMAIL: &str = "a@b.com";
pub const PASSWORD: &str = "abcdef";

pub const WAIT: Duration = Duration::from_secs(5);

struct Account {
    id: String,
    password: String,
}

#[derive(Default)]
pub struct FakeGateway {
    accounts: Mutex<HashMap<String, Account>>,
    session: Mutex<Option<Session>>,
    notifier: SessionNotifier,
    pub remote_sign_out_fails: AtomicBool,
    next_id: AtomicUsize,
}

impl FakeGateway {
    pub fn with_account(self, email: &str, password: &str, id: &str) -> Self {
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                id: id.to_string(),
                password: password.to_string(),
            },
        );
        self
    }

    /// Pretend a session survived from a previous run.
    pub fn with_session(self, id: &str, email: &str) -> Self {
        *self.session.lock().unwrap() = Some(Session {
            identity_id: id.to_string(),
            email: email.to_string(),
        });
        self
    }

    /// Session ends on the provider side (expiry, other tab).
    pub fn end_session_remotely(&self) {
        *self.session.lock().unwrap() = None;
        self.notifier.publish(SessionChange::Ended);
    }

    pub fn has_subscriber(&self) -> bool {
        self.notifier.has_subscriber()
    }

    fn start_session(&self, id: &str, email: &str) -> Session {
        let session = Session {
            identity_id: id.to_string(),
            email: email.to_string(),
        };
        *self.session.lock().unwrap() = Some(session.clone());
        self.notifier.publish(SessionChange::active(id));
        session
    }
}

#[async_trait]
impl IdentityGateway for FakeGateway {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<()> {
        CredentialPolicy::default().validate_sign_in(email, password)?;

        let id = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                Some(account) if account.password == password => account.id.clone(),
                _ => return Err(AuthError::invalid_credentials()),
            }
        };

        self.start_session(&id, email);
        Ok(())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _name: Option<&str>,
    ) -> AuthResult<Session> {
        CredentialPolicy::default().validate_sign_up(email, password)?;

        let id = {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::conflict(email));
            }
            let id = format!("user-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            accounts.insert(
                email.to_string(),
                Account {
                    id: id.clone(),
                    password: password.to_string(),
                },
            );
            id
        };

        Ok(self.start_session(&id, email))
    }

    async fn sign_out(&self) {
        *self.session.lock().unwrap() = None;
        self.notifier.publish(SessionChange::Ended);

        if self.remote_sign_out_fails.load(Ordering::SeqCst) {
            log::warn!("fake provider sign-out failed");
        }
    }

    async fn restore_session(&self) -> AuthResult<Option<Session>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    fn on_session_change(&self) -> AuthResult<SessionSubscription> {
        self.notifier.subscribe()
    }
}

/// Holds `get` open until released.
pub struct ReadGate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Default)]
pub struct FakeProfiles {
    profiles: Mutex<HashMap<String, Profile>>,
    gate: Mutex<Option<(Arc<Notify>, Arc<Notify>)>>,
    pub fail_reads: AtomicBool,
    pub fail_creates: AtomicBool,
    pub fail_onboarded_writes: AtomicBool,
    pub onboarded_writes: AtomicUsize,
}

impl FakeProfiles {
    pub fn with_profile(self, id: &str, email: &str, onboarded: bool) -> Self {
        self.profiles.lock().unwrap().insert(
            id.to_string(),
            Profile {
                id: id.to_string(),
                email: email.to_string(),
                name: None,
                onboarded,
            },
        );
        self
    }

    pub fn stored(&self, id: &str) -> Option<Profile> {
        self.profiles.lock().unwrap().get(id).cloned()
    }

    pub fn gate_reads(&self) -> ReadGate {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some((Arc::clone(&entered), Arc::clone(&release)));
        ReadGate { entered, release }
    }
}

#[async_trait]
impl ProfileStore for FakeProfiles {
    async fn get(&self, id: &str) -> StoreResult<Option<Profile>> {
        let gate = self.gate.lock().unwrap().take();
        if let Some((entered, release)) = gate {
            entered.notify_one();
            release.notified().await;
        }

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::read("profiles unavailable"));
        }

        Ok(self.stored(id))
    }

    async fn create(&self, profile: &Profile) -> StoreResult<()> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(StoreError::write("insert rejected"));
        }

        self.profiles
            .lock()
            .unwrap()
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn set_onboarded(&self, id: &str) -> StoreResult<()> {
        if self.fail_onboarded_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write("update rejected"));
        }

        self.onboarded_writes.fetch_add(1, Ordering::SeqCst);
        match self.profiles.lock().unwrap().get_mut(id) {
            Some(profile) => {
                profile.onboarded = true;
                Ok(())
            }
            None => Err(StoreError::write(format!("no profile {id}"))),
        }
    }
}

pub struct Harness {
    pub gateway: Arc<FakeGateway>,
    pub profiles: Arc<FakeProfiles>,
    pub controller: SessionController,
    pub store: SessionStore,
}

pub fn harness(gateway: FakeGateway, profiles: FakeProfiles) -> Harness {
    let gateway = Arc::new(gateway);
    let profiles = Arc::new(profiles);
    let store = SessionStore::new();
    let controller = SessionController::new(
        Arc::clone(&gateway) as Arc<dyn IdentityGateway>,
        Arc::clone(&profiles) as Arc<dyn ProfileStore>,
        store.clone(),
    );

    Harness {
        gateway,
        profiles,
        controller,
        store,
    }
}
