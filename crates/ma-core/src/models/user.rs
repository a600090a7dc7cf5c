//! Resolved identity held by the session store.

use crate::Profile;

use serde::{Deserialize, Serialize};

/// A signed-in account whose profile has been hydrated.
///
/// Only ever replaced as a whole value; there is no partially-populated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity-provider key, stable for the account's lifetime
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub onboarded: bool,
}

impl User {
    /// Compose a user from a hydrated profile record.
    pub fn from_profile(profile: Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            onboarded: profile.onboarded,
        }
    }

    /// Copy of this user with onboarding complete.
    pub fn onboarded(&self) -> Self {
        Self {
            onboarded: true,
            ..self.clone()
        }
    }

    /// Display name, falling back to the email's local part.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}
