use serde::{Deserialize, Serialize};

/// A collected onboarding answer: a slider position or a chosen label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Scale(u8),
    Choice(String),
}
