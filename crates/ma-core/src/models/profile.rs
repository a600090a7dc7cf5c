use serde::{Deserialize, Serialize};

/// Durable account metadata keyed by identity id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub onboarded: bool,
}

impl Profile {
    /// Profile for a freshly signed-up account. Always starts un-onboarded.
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.filter(|n| !n.trim().is_empty()),
            onboarded: false,
        }
    }
}
