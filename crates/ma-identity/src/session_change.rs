//! Out-of-band session change notifications.
//!
//! A gateway owns one [`SessionNotifier`]. Exactly one subscription may be live
//! at a time; its [`UnsubscribeToken`] releases it explicitly or on drop.
//! Changes are queued in publish order.

use ma_core::{AuthError, AuthResult};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// A session was created or renewed for this identity
    Active { identity_id: String },
    /// The session was destroyed (sign-out, expiry, revoked elsewhere)
    Ended,
}

impl SessionChange {
    pub fn active(identity_id: impl Into<String>) -> Self {
        Self::Active {
            identity_id: identity_id.into(),
        }
    }

    pub fn session_present(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn identity_id(&self) -> Option<&str> {
        match self {
            Self::Active { identity_id } => Some(identity_id),
            Self::Ended => None,
        }
    }
}

#[derive(Default)]
struct NotifierInner {
    sender: Option<mpsc::UnboundedSender<SessionChange>>,
    generation: u64,
}

#[derive(Clone, Default)]
pub struct SessionNotifier {
    inner: Arc<Mutex<NotifierInner>>,
}

impl SessionNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the observer. Fails while another subscription is live.
    #[track_caller]
    pub fn subscribe(&self) -> AuthResult<SessionSubscription> {
        let mut inner = self.lock();

        if inner.sender.as_ref().is_some_and(|tx| !tx.is_closed()) {
            return Err(AuthError::already_subscribed());
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        inner.generation += 1;
        inner.sender = Some(sender);

        debug!("Session-change subscription {} registered", inner.generation);

        Ok(SessionSubscription {
            receiver,
            token: UnsubscribeToken {
                notifier: Some(self.clone()),
                generation: inner.generation,
            },
        })
    }

    /// Queue a change for the live subscriber. Returns false when nobody listens.
    pub fn publish(&self, change: SessionChange) -> bool {
        let inner = self.lock();

        match &inner.sender {
            Some(sender) => sender.send(change).is_ok(),
            None => {
                debug!("Session change {change:?} dropped: no subscriber");
                false
            }
        }
    }

    pub fn has_subscriber(&self) -> bool {
        self.lock()
            .sender
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    fn release(&self, generation: u64) {
        let mut inner = self.lock();

        // A newer subscription replaced this one; leave it alone.
        if inner.generation == generation {
            inner.sender = None;
            debug!("Session-change subscription {generation} released");
        }
    }

    fn lock(&self) -> MutexGuard<'_, NotifierInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A live registration: the ordered change stream plus its release handle.
pub struct SessionSubscription {
    receiver: mpsc::UnboundedReceiver<SessionChange>,
    token: UnsubscribeToken,
}

impl SessionSubscription {
    /// Next change, or `None` once unsubscribed.
    pub async fn recv(&mut self) -> Option<SessionChange> {
        self.receiver.recv().await
    }

    /// Split so the stream can move into a listener task while the token
    /// stays with whoever owns teardown.
    pub fn into_parts(self) -> (mpsc::UnboundedReceiver<SessionChange>, UnsubscribeToken) {
        (self.receiver, self.token)
    }
}

/// Releases a subscription. Dropping the token releases it too.
pub struct UnsubscribeToken {
    notifier: Option<SessionNotifier>,
    generation: u64,
}

impl UnsubscribeToken {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(notifier) = self.notifier.take() {
            notifier.release(self.generation);
        }
    }
}

impl Drop for UnsubscribeToken {
    fn drop(&mut self) {
        self.release();
    }
}
