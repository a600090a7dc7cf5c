use crate::Session;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session tokens kept between runs.
#[derive(Clone, Serialize, Deserialize)]
pub struct CachedSession {
    pub identity_id: String,
    pub email: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl CachedSession {
    pub fn session(&self) -> Session {
        Session {
            identity_id: self.identity_id.clone(),
            email: self.email.clone(),
        }
    }
}

// Tokens never reach logs.
impl fmt::Debug for CachedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedSession")
            .field("identity_id", &self.identity_id)
            .field("email", &self.email)
            .field("access_token", &"<redacted>")
            .field("saved_at", &self.saved_at)
            .finish()
    }
}
