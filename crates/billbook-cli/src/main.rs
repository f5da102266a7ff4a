//! billbook CLI - keep utility bills and priced items in sync with a REST backend
//!
//! One-shot commands for scripting plus an interactive form session.

mod cli;
mod commands;
mod config_profiles;
mod error;
mod view;


use billbook_core::{Bills, Items, ResourceKind};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_client_config;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::run_record_command;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        if !error.is_reported() {
            eprintln!("Error: {error}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("billbook=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Records(command)) => {
            let config =
                resolve_client_config(cli.base_url.as_deref(), cli.resource, cli.profile.as_deref())?;
            match config.resource {
                ResourceKind::Bills => run_record_command::<Bills>(command, &config).await?,
                ResourceKind::Items => run_record_command::<Items>(command, &config).await?,
            }
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { command }) => {
            run_config(
                command,
                cli.base_url.as_deref(),
                cli.resource,
                cli.profile.as_deref(),
            )?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}
