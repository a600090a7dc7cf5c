//! Fixed onboarding questionnaire.

use crate::{Answer, CoreError, Result as CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::Serialize;

pub const SCALE_MAX: u8 = 100;
/// Position a slider shows before the user moves it
pub const SCALE_DEFAULT: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Slider {
        min_label: &'static str,
        max_label: &'static str,
    },
    Choice {
        options: &'static [&'static str],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

pub static ONBOARDING_QUESTIONS: [Question; 6] = [
    Question {
        id: "stress",
        label: "How would you rate your current stress level?",
        kind: QuestionKind::Slider {
            min_label: "Very low",
            max_label: "Very high",
        },
    },
    Question {
        id: "sleep",
        label: "How has your sleep quality been recently?",
        kind: QuestionKind::Choice {
            options: &["Poor", "Fair", "Good", "Excellent"],
        },
    },
    Question {
        id: "mood",
        label: "How would you describe your mood today?",
        kind: QuestionKind::Choice {
            options: &["Low", "Neutral", "Good", "Great"],
        },
    },
    Question {
        id: "workload",
        label: "How manageable is your current workload?",
        kind: QuestionKind::Slider {
            min_label: "Overwhelming",
            max_label: "Very manageable",
        },
    },
    Question {
        id: "support",
        label: "Do you feel you have adequate support around you?",
        kind: QuestionKind::Choice {
            options: &["Not at all", "Somewhat", "Mostly", "Absolutely"],
        },
    },
    Question {
        id: "goal",
        label: "What's your primary goal with MindAnchor?",
        kind: QuestionKind::Choice {
            options: &[
                "Reduce stress",
                "Better sleep",
                "Track mood",
                "Learn coping skills",
            ],
        },
    },
];

impl Question {
    /// Look up a question in the onboarding catalog.
    #[track_caller]
    pub fn find(id: &str) -> CoreResult<&'static Question> {
        ONBOARDING_QUESTIONS
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| CoreError::UnknownQuestion {
                question_id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Check an answer fits this question's kind.
    #[track_caller]
    pub fn validate(&self, answer: &Answer) -> CoreResult<()> {
        let problem = match (&self.kind, answer) {
            (QuestionKind::Slider { .. }, Answer::Scale(value)) if *value <= SCALE_MAX => None,
            (QuestionKind::Slider { .. }, Answer::Scale(value)) => {
                Some(format!("scale must be 0-{SCALE_MAX}, got {value}"))
            }
            (QuestionKind::Choice { options }, Answer::Choice(choice))
                if options.contains(&choice.as_str()) =>
            {
                None
            }
            (QuestionKind::Choice { options }, Answer::Choice(choice)) => Some(format!(
                "'{choice}' is not one of: {}",
                options.join(", ")
            )),
            (QuestionKind::Slider { .. }, Answer::Choice(_)) => {
                Some(String::from("expected a numeric scale value"))
            }
            (QuestionKind::Choice { .. }, Answer::Scale(_)) => {
                Some(String::from("expected one of the listed options"))
            }
        };

        match problem {
            None => Ok(()),
            Some(message) => Err(CoreError::InvalidAnswer {
                question_id: self.id.to_string(),
                message,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Parse raw text input into an answer for this question.
    ///
    /// Choice labels match case-insensitively and are stored in catalog spelling.
    #[track_caller]
    pub fn parse_answer(&self, raw: &str) -> CoreResult<Answer> {
        let raw = raw.trim();
        let answer = match self.kind {
            QuestionKind::Slider { .. } => match raw.parse::<u8>() {
                Ok(value) => Answer::Scale(value),
                Err(_) => {
                    return Err(CoreError::InvalidAnswer {
                        question_id: self.id.to_string(),
                        message: format!("'{raw}' is not a number 0-{SCALE_MAX}"),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            },
            QuestionKind::Choice { options } => {
                let label = options
                    .iter()
                    .find(|opt| opt.eq_ignore_ascii_case(raw))
                    .map_or_else(|| raw.to_string(), |opt| opt.to_string());
                Answer::Choice(label)
            }
        };

        self.validate(&answer)?;
        Ok(answer)
    }
}
