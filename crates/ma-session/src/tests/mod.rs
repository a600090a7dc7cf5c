mod session_store;

use ma_core::User;

pub(crate) fn user(onboarded: bool) -> User {
    User {
        id: "user-123".to_string(),
        email: "a@b.com".to_string(),
        name: None,
        onboarded,
    }
}
