use crate::SessionController;

use ma_core::{Answer, ONBOARDING_QUESTIONS, Question, User};

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

/// Where the wizard stands after `next()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardStep {
    Question { index: usize },
    Completed { user: User },
}

/// Drives the fixed onboarding questionnaire.
///
/// Answers are optional per step and kept while moving back and forth.
pub struct OnboardingWizard {
    controller: SessionController,
    questions: &'static [Question],
    cursor: usize,
    answers: BTreeMap<&'static str, Answer>,
}

impl OnboardingWizard {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            questions: &ONBOARDING_QUESTIONS,
            cursor: 0,
            answers: BTreeMap::new(),
        }
    }

    pub fn current_question(&self) -> &'static Question {
        &self.questions[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// `(step, total)` with a one-based step, as in "Step 2 of 6".
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor + 1, self.questions.len())
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    pub fn answers(&self) -> &BTreeMap<&'static str, Answer> {
        &self.answers
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(self.current_question().id)
    }

    /// Record (or overwrite) the answer to the current question.
    pub fn answer(&mut self, answer: Answer) -> crate::Result<()> {
        let question = self.current_question();
        question.validate(&answer)?;
        self.answers.insert(question.id, answer);
        Ok(())
    }

    /// Parse and record a raw answer for the current question.
    pub fn answer_raw(&mut self, raw: &str) -> crate::Result<()> {
        let answer = self.current_question().parse_answer(raw)?;
        self.answer(answer)
    }

    /// Advance, or on the last question commit onboarding.
    ///
    /// A failed commit leaves the cursor on the last question so it can be retried.
    pub async fn next(&mut self) -> crate::Result<WizardStep> {
        if !self.is_last() {
            self.cursor += 1;
            return Ok(WizardStep::Question { index: self.cursor });
        }

        debug!(
            "Completing onboarding with {} of {} answers",
            self.answers.len(),
            self.questions.len()
        );
        let user = self.controller.complete_onboarding().await?;
        Ok(WizardStep::Completed { user })
    }

    pub fn back(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}
