
use crate::{LocalIdentityGateway, LocalProfileStore, local_backend};

use ma_core::CredentialPolicy;

use tempfile::TempDir;

pub(crate) const EMAIL: &str = "a@b.com";
pub(crate) const PASSWORD: &str = "secret1";
pub(crate) const RECORD_FILE: &str = "mindanchor_user.json";
pub(crate) const MARKER_FILE: &str = "session.json";

/// Local backend over a record file in a fresh temp dir
pub(crate) fn local() -> (TempDir, LocalIdentityGateway, LocalProfileStore) {
    let temp = TempDir::new().unwrap();
    let (gateway, profiles) = local_backend(
        temp.path().join(RECORD_FILE),
        temp.path().join(MARKER_FILE),
        CredentialPolicy::default(),
    );
    (temp, gateway, profiles)
}
