//! Session and onboarding state machine.
//!
//! [`SessionStore`] is the single source of truth for the resolved identity.
//! [`SessionController`] is the only writer; [`Bootstrapper`] owns the
//! initial loading window and the session-change listener; [`Navigator`]
//! consults the guard against the current snapshot; [`OnboardingWizard`]
//! drives the questionnaire to its one completion transition.

pub mod bootstrapper;
pub mod controller;
pub mod error;
pub mod navigator;
pub mod session_store;
pub mod wizard;

pub use bootstrapper::{BootstrapHandle, Bootstrapper};
pub use controller::SessionController;
pub use error::{Result, SessionError};
pub use navigator::{Navigation, Navigator};
pub use session_store::{SessionSnapshot, SessionStore};
pub use wizard::{OnboardingWizard, WizardStep};

#[cfg(test)]
mod tests;
