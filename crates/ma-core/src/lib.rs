pub mod credentials;
pub mod error;
pub mod models;
pub mod route_guard;

pub use credentials::{CredentialPolicy, is_valid_email};
pub use error::{AuthError, AuthResult, CoreError, Result, StoreError, StoreResult};
pub use models::answer::Answer;
pub use models::identity_state::IdentityState;
pub use models::profile::Profile;
pub use models::question::{ONBOARDING_QUESTIONS, Question, QuestionKind};
pub use models::route::{Route, RouteClass};
pub use models::route_decision::RouteDecision;
pub use models::user::User;
pub use route_guard::RouteGuard;

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;
pub const DEFAULT_MAX_EMAIL_LENGTH: usize = 254;

#[cfg(test)]
mod tests;
