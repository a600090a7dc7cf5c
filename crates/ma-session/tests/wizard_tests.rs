mod common;

use common::{EMAIL, FakeGateway, FakeProfiles, harness};

use ma_core::{Answer, ONBOARDING_QUESTIONS};
use ma_session::{OnboardingWizard, SessionError, WizardStep};

use std::sync::atomic::Ordering;

use googletest::prelude::*;

fn signed_in() -> common::Harness {
    let h = harness(
        FakeGateway::default().with_session("user-1", EMAIL),
        FakeProfiles::default().with_profile("user-1", EMAIL, false),
    );
    h.store.set(ma_core::User {
        id: "user-1".to_string(),
        email: EMAIL.to_string(),
        name: None,
        onboarded: false,
    });
    h
}

#[tokio::test]
async fn given_first_question_when_back_then_cursor_stays_at_zero() {
    let h = signed_in();
    let mut wizard = OnboardingWizard::new(h.controller.clone());

    wizard.back();

    assert_that!(wizard.cursor(), eq(0));
    assert_that!(wizard.progress(), eq((1, 6)));
}

#[tokio::test]
async fn given_answered_question_when_revisited_then_answer_kept_and_overwritable() {
    // Given: First question answered, wizard moved on
    let h = signed_in();
    let mut wizard = OnboardingWizard::new(h.controller.clone());
    wizard.answer(Answer::Scale(30)).unwrap();
    wizard.next().await.unwrap();

    // When: Going back and overwriting
    wizard.back();
    let kept = wizard.current_answer().cloned();
    wizard.answer(Answer::Scale(80)).unwrap();

    // Then
    assert_that!(kept, some(eq(&Answer::Scale(30))));
    assert_that!(wizard.answers().get("stress"), some(eq(&Answer::Scale(80))));
}

#[tokio::test]
async fn given_choice_question_when_answer_not_an_option_then_invalid_answer() {
    let h = signed_in();
    let mut wizard = OnboardingWizard::new(h.controller.clone());
    wizard.next().await.unwrap();

    let result = wizard.answer_raw("Terrible");

    assert!(matches!(result, Err(SessionError::InvalidAnswer(_))));
    assert_that!(wizard.current_answer(), none());
}

#[tokio::test]
async fn given_unanswered_steps_when_advancing_to_end_then_completes() {
    // Given: Answers are optional
    let h = signed_in();
    let mut wizard = OnboardingWizard::new(h.controller.clone());

    // When
    let mut last = None;
    for _ in 0..ONBOARDING_QUESTIONS.len() {
        last = Some(wizard.next().await.unwrap());
    }

    // Then
    assert!(matches!(last, Some(WizardStep::Completed { .. })));
    assert!(h.store.user().unwrap().onboarded);
}

#[tokio::test]
async fn given_last_question_when_commit_fails_then_cursor_stays_for_retry() {
    let h = signed_in();
    h.profiles.fail_onboarded_writes.store(true, Ordering::SeqCst);
    let mut wizard = OnboardingWizard::new(h.controller.clone());
    for _ in 1..ONBOARDING_QUESTIONS.len() {
        wizard.next().await.unwrap();
    }
    assert!(wizard.is_last());

    let failed = wizard.next().await;
    h.profiles.fail_onboarded_writes.store(false, Ordering::SeqCst);
    let retried = wizard.next().await.unwrap();

    assert!(failed.is_err());
    assert!(matches!(retried, WizardStep::Completed { ref user } if user.onboarded));
    assert_that!(wizard.progress(), eq((6, 6)));
}
