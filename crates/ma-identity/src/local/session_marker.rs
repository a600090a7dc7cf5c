use crate::Session;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marks the local account as signed in. Removed on sign-out; the account
/// record itself outlives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMarker {
    pub email: String,
    pub started_at: DateTime<Utc>,
}

impl SessionMarker {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            started_at: Utc::now(),
        }
    }

    pub fn session(&self) -> Session {
        Session {
            identity_id: self.email.clone(),
            email: self.email.clone(),
        }
    }
}
