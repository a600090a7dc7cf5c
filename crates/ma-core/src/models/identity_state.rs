use crate::User;

use serde::Serialize;

/// The three visitor states routing decisions are made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityState {
    Anonymous,
    Unonboarded,
    Onboarded,
}

impl IdentityState {
    pub fn of(user: Option<&User>) -> Self {
        match user {
            None => Self::Anonymous,
            Some(user) if user.onboarded => Self::Onboarded,
            Some(_) => Self::Unonboarded,
        }
    }
}

impl From<Option<&User>> for IdentityState {
    fn from(user: Option<&User>) -> Self {
        Self::of(user)
    }
}
