//! End-to-end flows over the local single-account backend.

mod common;

use common::{EMAIL, PASSWORD, WAIT};

use ma_core::{CredentialPolicy, Route};
use ma_identity::{IdentityGateway, ProfileStore, local_backend};
use ma_session::{
    BootstrapHandle, Bootstrapper, Navigation, Navigator, OnboardingWizard, SessionController,
    SessionStore, WizardStep,
};

use std::path::Path;
use std::sync::Arc;

use googletest::prelude::*;
use tempfile::TempDir;

struct App {
    controller: SessionController,
    store: SessionStore,
    navigator: Navigator,
    handle: BootstrapHandle,
}

const RECORD_FILE: &str = "mindanchor_user.json";
const MARKER_FILE: &str = "session.json";

/// Start the app over a config dir, as the binary does on every launch.
async fn start(dir: &Path) -> App {
    let (gateway, profiles) = local_backend(
        dir.join(RECORD_FILE),
        dir.join(MARKER_FILE),
        CredentialPolicy::default(),
    );
    let store = SessionStore::new();
    let controller = SessionController::new(
        Arc::new(gateway) as Arc<dyn IdentityGateway>,
        Arc::new(profiles) as Arc<dyn ProfileStore>,
        store.clone(),
    );
    let handle = Bootstrapper::start(controller.clone()).await.unwrap();

    App {
        controller,
        navigator: Navigator::new(store.clone()),
        store,
        handle,
    }
}

async fn complete_wizard(controller: &SessionController) -> WizardStep {
    let mut wizard = OnboardingWizard::new(controller.clone());
    let answers = ["72", "good", "Neutral", "40", "Mostly", "Better sleep"];

    for raw in answers {
        wizard.answer_raw(raw).unwrap();
        let step = wizard.next().await.unwrap();
        if matches!(step, WizardStep::Completed { .. }) {
            return step;
        }
    }

    panic!("wizard did not complete after every question");
}

#[tokio::test]
async fn given_fresh_visitor_when_requesting_dashboard_then_redirected_to_login() {
    // Given: No stored account
    let temp = TempDir::new().unwrap();
    let app = start(temp.path()).await;

    // When
    let navigation = app.navigator.navigate("/dashboard");

    // Then
    assert!(!app.store.is_loading());
    assert_that!(navigation, eq(&Navigation::Redirect(Route::Login)));
    app.handle.shutdown().await;
}

#[tokio::test]
async fn given_sign_up_then_profile_unonboarded_and_dashboard_redirects_to_onboarding() {
    // Given
    let temp = TempDir::new().unwrap();
    let app = start(temp.path()).await;

    // When
    app.controller.sign_up(EMAIL, PASSWORD, None).await.unwrap();

    // Then
    let user = app.store.user().unwrap();
    assert_that!(user.email, eq(EMAIL));
    assert!(!user.onboarded);
    assert_that!(
        app.navigator.navigate("/dashboard"),
        eq(&Navigation::Redirect(Route::Onboarding))
    );
    app.handle.shutdown().await;
}

#[tokio::test]
async fn given_unonboarded_user_when_wizard_completed_then_onboarding_redirects_to_dashboard() {
    // Given: A freshly signed-up user
    let temp = TempDir::new().unwrap();
    let app = start(temp.path()).await;
    app.controller.sign_up(EMAIL, PASSWORD, Some("Ada")).await.unwrap();

    // When: Answering all six questions
    let step = complete_wizard(&app.controller).await;

    // Then
    assert!(matches!(step, WizardStep::Completed { ref user } if user.onboarded));
    assert!(app.store.user().unwrap().onboarded);
    assert_that!(
        app.navigator.navigate("/onboarding"),
        eq(&Navigation::Redirect(Route::Dashboard))
    );
    app.handle.shutdown().await;

    // And: A restart restores the onboarded user from the record
    let restarted = start(temp.path()).await;
    let user = restarted.store.user().unwrap();
    assert!(user.onboarded);
    assert_that!(user.name, some(eq("Ada")));
    restarted.handle.shutdown().await;
}

#[tokio::test]
async fn given_onboarded_user_when_requesting_login_then_redirected_to_dashboard() {
    // Given: An account that finished onboarding, then signed back in
    let temp = TempDir::new().unwrap();
    let app = start(temp.path()).await;
    app.controller.sign_up(EMAIL, PASSWORD, None).await.unwrap();
    complete_wizard(&app.controller).await;
    app.handle.shutdown().await;
    let app = start(temp.path()).await;

    // When
    let navigation = app.navigator.navigate("/login");

    // Then
    assert_that!(navigation, eq(&Navigation::Redirect(Route::Dashboard)));
    app.handle.shutdown().await;
}

#[tokio::test]
async fn given_stored_account_when_signing_in_then_listener_hydrates_user() {
    // Given: The account record exists but no one is signed in
    let temp = TempDir::new().unwrap();
    let (_, profiles) = local_backend(
        temp.path().join(RECORD_FILE),
        temp.path().join(MARKER_FILE),
        CredentialPolicy::default(),
    );
    profiles
        .create(&ma_core::Profile::new(EMAIL, EMAIL, None))
        .await
        .unwrap();
    let app = start(temp.path()).await;
    assert_that!(app.store.user(), none());

    // When
    app.controller.sign_in(EMAIL, "whatever").await.unwrap();

    // Then: The session-change listener hydrates the user
    let settled = tokio::time::timeout(WAIT, app.store.wait_for(|s| s.user.is_some()))
        .await
        .unwrap();
    assert_that!(settled.user.map(|u| u.email), some(eq(EMAIL)));
    app.handle.shutdown().await;
}

#[tokio::test]
async fn given_onboarded_user_signed_out_when_signing_in_after_restart_then_still_onboarded() {
    // Given: Sign up, finish onboarding, sign out
    let temp = TempDir::new().unwrap();
    let app = start(temp.path()).await;
    app.controller.sign_up(EMAIL, PASSWORD, None).await.unwrap();
    complete_wizard(&app.controller).await;
    app.controller.sign_out().await;
    app.handle.shutdown().await;

    // And: A restart comes up anonymous
    let app = start(temp.path()).await;
    assert_that!(app.store.user(), none());

    // When: Signing in with the stored email
    app.controller.sign_in(EMAIL, PASSWORD).await.unwrap();

    // Then: The user is back, still onboarded, and lands on the dashboard
    let settled = tokio::time::timeout(WAIT, app.store.wait_for(|s| s.user.is_some()))
        .await
        .unwrap();
    let user = settled.user.unwrap();
    assert_that!(user.id, eq(EMAIL));
    assert!(user.onboarded);
    assert_that!(app.navigator.settle("/"), some(eq(&Route::Dashboard)));
    app.handle.shutdown().await;
}

#[tokio::test]
async fn given_signed_in_when_signing_out_then_user_cleared_and_landing_renders() {
    let temp = TempDir::new().unwrap();
    let app = start(temp.path()).await;
    app.controller.sign_up(EMAIL, PASSWORD, None).await.unwrap();

    app.controller.sign_out().await;

    assert_that!(app.store.user(), none());
    assert_that!(
        app.navigator.navigate("/"),
        eq(&Navigation::Render(Route::Landing))
    );
    let settled = tokio::time::timeout(WAIT, app.store.wait_for(|s| s.user.is_none()))
        .await
        .unwrap();
    assert_that!(settled.user, none());
    app.handle.shutdown().await;
}
