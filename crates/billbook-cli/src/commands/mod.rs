pub mod add;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod search;
pub mod shell;

use billbook_core::config::ClientConfig;
use billbook_core::Resource;

use crate::cli::RecordCommands;
use crate::error::CliError;

pub async fn run_record_command<R: Resource>(
    command: RecordCommands,
    config: &ClientConfig,
) -> Result<(), CliError> {
    tracing::debug!("Using {} at {}", R::COLLECTION, config.base_url);
    match command {
        RecordCommands::List { json } => list::run_list::<R>(config, json).await,
        RecordCommands::Add { assignments } => add::run_add::<R>(&assignments, config).await,
        RecordCommands::Edit { id, assignments } => {
            edit::run_edit::<R>(&id, &assignments, config).await
        }
        RecordCommands::Search { id, json } => search::run_search::<R>(&id, json, config).await,
        RecordCommands::Delete { id, yes } => delete::run_delete::<R>(&id, yes, config).await,
        RecordCommands::Shell => shell::run_shell::<R>(config).await,
    }
}
