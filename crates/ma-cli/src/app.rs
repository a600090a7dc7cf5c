//! Bootstrap, run one command, tear down, then report the settled state.

use crate::commands::Commands;
use crate::error::{CliError, CliResult};
use crate::logger;

use ma_config::Config;
use ma_core::{IdentityState, ONBOARDING_QUESTIONS, Question, Route};
use ma_identity::{Backend, build_backend};
use ma_session::{
    Bootstrapper, Navigator, OnboardingWizard, SessionController, SessionStore, WizardStep,
};

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{info, warn};
use serde_json::{Value, json};

/// What a command did; rendered once all session changes are applied.
enum Outcome {
    Session,
    Visit(String),
    Onboarded(BTreeMap<&'static str, String>),
}

pub async fn run(command: Commands) -> CliResult<Value> {
    if matches!(command, Commands::Questions) {
        return Ok(serde_json::to_value(&ONBOARDING_QUESTIONS)?);
    }

    let config = Config::load()?;
    config.validate()?;
    logger::initialize(
        config.logging.level,
        config.logging.file.as_ref().map(PathBuf::from),
        config.logging.colored,
    )?;
    config.log_summary();

    let backend = build_backend(&config)?;
    let store = SessionStore::new();
    let controller = SessionController::new(
        backend.gateway.clone(),
        backend.profiles.clone(),
        store.clone(),
    );

    let handle = Bootstrapper::start(controller.clone()).await?;
    let outcome = execute(command, &backend, &controller).await;
    // Drains queued session changes so the store has settled.
    handle.shutdown().await;

    render(outcome?, &backend, &store)
}

async fn execute(
    command: Commands,
    backend: &Backend,
    controller: &SessionController,
) -> CliResult<Outcome> {
    match command {
        Commands::Status => {
            // An expired session publishes `Ended`, applied before rendering.
            if let Err(e) = backend.check_session().await {
                warn!("Could not re-validate session: {e}");
            }
            Ok(Outcome::Session)
        }
        Commands::Signup {
            email,
            password,
            name,
        } => {
            controller
                .sign_up(&email, &password, name.as_deref())
                .await?;
            Ok(Outcome::Session)
        }
        Commands::Login { email, password } => {
            controller.sign_in(&email, &password).await?;
            Ok(Outcome::Session)
        }
        Commands::Logout => {
            controller.sign_out().await;
            Ok(Outcome::Session)
        }
        Commands::Visit { path } => Ok(Outcome::Visit(path)),
        Commands::Onboard { answers } => {
            let answers = parse_answers(&answers)?;
            onboard(controller, &answers).await?;
            Ok(Outcome::Onboarded(answers))
        }
        Commands::Questions => Ok(Outcome::Session),
    }
}

/// Walk the wizard front to back, answering where an answer was given.
async fn onboard(
    controller: &SessionController,
    answers: &BTreeMap<&'static str, String>,
) -> CliResult<()> {
    let mut wizard = OnboardingWizard::new(controller.clone());

    loop {
        let question = wizard.current_question();
        if let Some(raw) = answers.get(question.id) {
            wizard.answer_raw(raw)?;
        }

        if let WizardStep::Completed { .. } = wizard.next().await? {
            info!(
                "Onboarding finished with {} answer(s)",
                wizard.answers().len()
            );
            return Ok(());
        }
    }
}

/// Parse repeated `id=value` arguments, rejecting unknown question ids.
pub(crate) fn parse_answers(raw: &[String]) -> CliResult<BTreeMap<&'static str, String>> {
    let mut answers = BTreeMap::new();

    for entry in raw {
        let Some((id, value)) = entry.split_once('=') else {
            return Err(CliError::usage(format!(
                "expected <question-id>=<value>, got '{entry}'"
            )));
        };

        let question = Question::find(id.trim())
            .map_err(|_| CliError::usage(format!("unknown question '{}'", id.trim())))?;
        answers.insert(question.id, value.trim().to_string());
    }

    Ok(answers)
}

fn render(outcome: Outcome, backend: &Backend, store: &SessionStore) -> CliResult<Value> {
    let navigator = Navigator::new(store.clone());
    let snapshot = store.current();
    let state = IdentityState::of(snapshot.user.as_ref());

    let value = match outcome {
        Outcome::Session => json!({
            "backend": backend.kind.to_string(),
            "state": state,
            "user": snapshot.user,
            "greeting": snapshot.user.as_ref().map(|u| format!("Welcome, {}", u.display_name())),
            "home": navigator.settle(Route::Landing.path()),
        }),
        Outcome::Visit(path) => json!({
            "state": state,
            "requested": Route::parse(&path),
            "navigation": navigator.navigate(&path),
            "settled": navigator.settle(&path),
        }),
        Outcome::Onboarded(answers) => json!({
            "state": state,
            "user": snapshot.user,
            "answers": answers,
            "home": navigator.settle(Route::Landing.path()),
        }),
    };

    Ok(value)
}
