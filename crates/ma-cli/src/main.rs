//! mindanchor - MindAnchor session and onboarding CLI
//!
//! Each invocation restores any stored session, runs one command against the
//! session state machine, and prints the resulting state as JSON.
//!
//! # Examples
//!
//! ```bash
//! mindanchor signup --email a@b.com --password abcdef --pretty
//! mindanchor onboard --answer stress=40 --answer sleep=good
//! mindanchor visit /dashboard
//! ```

mod app;
mod cli;
mod commands;
mod error;
mod logger;


use crate::cli::Cli;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = app::run(cli.command).await;

    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            log::debug!("Command failed: {e}");
            eprintln!("{}", e.to_json());
            ExitCode::FAILURE
        }
    }
}
