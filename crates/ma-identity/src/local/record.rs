use ma_core::Profile;

use serde::{Deserialize, Serialize};

/// The local backend's only persisted document. No `id`: the email is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalRecord {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub onboarded: bool,
}

impl LocalRecord {
    pub fn matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }

    pub fn to_profile(&self) -> Profile {
        Profile {
            id: self.email.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            onboarded: self.onboarded,
        }
    }
}

impl From<&Profile> for LocalRecord {
    fn from(profile: &Profile) -> Self {
        Self {
            email: profile.email.clone(),
            name: profile.name.clone(),
            onboarded: profile.onboarded,
        }
    }
}
