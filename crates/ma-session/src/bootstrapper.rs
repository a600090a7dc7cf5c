use crate::SessionController;

use ma_identity::{SessionChange, UnsubscribeToken};

use log::{debug, info, warn};
use tokio::task::JoinHandle;

/// Startup sequence owning the loading window and the session-change listener.
pub struct Bootstrapper;

impl Bootstrapper {
    /// 1. Register for session changes (events queue until the listener starts).
    /// 2. Restore any persisted session and hydrate it.
    /// 3. End the loading window, whatever step 2 produced.
    /// 4. Spawn the listener that hydrates or clears on each change, in order.
    pub async fn start(controller: SessionController) -> crate::Result<BootstrapHandle> {
        let subscription = controller.gateway().on_session_change();

        match controller.gateway().restore_session().await {
            Ok(Some(session)) => {
                debug!("Restoring session via {}", controller.gateway().name());
                controller
                    .apply_change(&SessionChange::active(session.identity_id))
                    .await;
            }
            Ok(None) => debug!("No session to restore"),
            Err(e) => warn!("Session restore failed; starting signed out: {e}"),
        }

        if controller.store().finish_loading() {
            info!(
                "Session resolved: {}",
                if controller.store().user().is_some() {
                    "signed in"
                } else {
                    "anonymous"
                }
            );
        }

        let (mut receiver, token) = subscription?.into_parts();
        let listener_controller = controller.clone();
        let listener = tokio::spawn(async move {
            while let Some(change) = receiver.recv().await {
                debug!("Session change: {change:?}");
                listener_controller.apply_change(&change).await;
            }
            debug!("Session-change listener stopped");
        });

        Ok(BootstrapHandle {
            token: Some(token),
            listener: Some(listener),
        })
    }
}

/// Keeps the session-change subscription alive. Dropping it unsubscribes.
pub struct BootstrapHandle {
    token: Option<UnsubscribeToken>,
    listener: Option<JoinHandle<()>>,
}

impl BootstrapHandle {
    /// Unsubscribe and wait for already-queued changes to be applied.
    pub async fn shutdown(mut self) {
        if let Some(token) = self.token.take() {
            token.unsubscribe();
        }

        if let Some(listener) = self.listener.take()
            && let Err(e) = listener.await
        {
            warn!("Session-change listener ended abnormally: {e}");
        }
    }
}
