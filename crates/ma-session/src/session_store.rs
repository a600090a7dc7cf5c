use ma_core::User;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;

/// One consistent view of the resolved identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    /// True until the first resolution attempt at startup completes
    pub loading: bool,
}

/// Process-wide identity state, injected wherever it is read.
///
/// Every update replaces the snapshot under the channel's write lock and wakes
/// all subscribers, so readers never see a half-applied change.
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionSnapshot>>,
    /// Bumped on every clear; hydrations started under an older epoch are stale.
    epoch: Arc<AtomicU64>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionSnapshot {
            user: None,
            loading: true,
        });

        Self {
            tx: Arc::new(tx),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn current(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.tx.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().loading
    }

    pub fn set(&self, user: User) {
        self.tx.send_modify(|snapshot| snapshot.user = Some(user));
    }

    pub fn clear(&self) {
        self.tx.send_modify(|snapshot| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            snapshot.user = None;
        });
    }

    /// End the loading window. Only the first call has any effect.
    pub fn finish_loading(&self) -> bool {
        self.tx.send_if_modified(|snapshot| {
            let was_loading = snapshot.loading;
            snapshot.loading = false;
            was_loading
        })
    }

    /// Receiver that observes every subsequent update.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Wait for a snapshot satisfying `predicate`, checking the current one first.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> SessionSnapshot {
        let mut rx = self.subscribe();

        loop {
            {
                let snapshot = rx.borrow_and_update();
                if predicate(&snapshot) {
                    return snapshot.clone();
                }
            }

            // The sender lives as long as `self`, so this only fails if it is gone.
            if rx.changed().await.is_err() {
                return self.current();
            }
        }
    }

    pub async fn wait_until_loaded(&self) -> SessionSnapshot {
        self.wait_for(|snapshot| !snapshot.loading).await
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Set `user` unless the store was cleared since `epoch` was read.
    pub(crate) fn set_if_epoch(&self, epoch: u64, user: User) -> bool {
        self.tx.send_if_modified(|snapshot| {
            if self.epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            snapshot.user = Some(user);
            true
        })
    }

    /// Clear unless the store was already cleared since `epoch` was read.
    pub(crate) fn clear_if_epoch(&self, epoch: u64) -> bool {
        self.tx.send_if_modified(|snapshot| {
            if self.epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            self.epoch.fetch_add(1, Ordering::SeqCst);
            snapshot.user = None;
            true
        })
    }

    /// Replace the user only while the same account is still signed in.
    pub(crate) fn replace_user(&self, user: User) -> bool {
        self.tx.send_if_modified(|snapshot| match &snapshot.user {
            Some(current) if current.id == user.id => {
                snapshot.user = Some(user);
                true
            }
            _ => false,
        })
    }
}
