//! Single-account development fallback.
//!
//! One JSON record `{ email, name?, onboarded }` under a well-known key is both
//! the account and its profile. A separate marker file says whether that
//! account is signed in. Identity id is the email; passwords are neither
//! stored nor checked. Not a production contract.

mod gateway;
mod profile_store;
mod record;
mod session_marker;

pub use gateway::LocalIdentityGateway;
pub use profile_store::LocalProfileStore;
pub use record::LocalRecord;
pub use session_marker::SessionMarker;

use crate::{JsonFile, Session, SessionNotifier};

use ma_core::CredentialPolicy;

use std::path::PathBuf;
use std::sync::Arc;

use log::warn;
use tokio::sync::RwLock;

pub(crate) struct LocalState {
    pub(crate) record: JsonFile,
    pub(crate) marker: JsonFile,
    pub(crate) session: RwLock<Option<Session>>,
    pub(crate) notifier: SessionNotifier,
}

/// Build the local gateway and profile store over one record file and its
/// signed-in marker.
pub fn local_backend(
    record_path: impl Into<PathBuf>,
    marker_path: impl Into<PathBuf>,
    policy: CredentialPolicy,
) -> (LocalIdentityGateway, LocalProfileStore) {
    warn!("Local identity backend does not verify passwords; any password signs in");

    let state = Arc::new(LocalState {
        record: JsonFile::new(record_path),
        marker: JsonFile::new(marker_path),
        session: RwLock::new(None),
        notifier: SessionNotifier::new(),
    });

    (
        LocalIdentityGateway::new(Arc::clone(&state), policy),
        LocalProfileStore::new(state),
    )
}
