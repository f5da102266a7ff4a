use billbook_core::config::ClientConfig;
use billbook_core::{Resource, SearchOutcome};

use crate::commands::common::{
    apply_assignments, describe_outcome, normalize_record_id, open_controller, parse_assignments,
};
use crate::error::CliError;
use crate::view::{Regions, TerminalView};

/// Fetch the record, bind the form to it, apply overrides and submit.
pub async fn run_edit<R: Resource>(
    id: &str,
    assignments: &[String],
    config: &ClientConfig,
) -> Result<(), CliError> {
    let id = normalize_record_id(id)?;
    let assignments = parse_assignments(assignments)?;
    let mut controller = open_controller::<R>(config, TerminalView::stdio(Regions::NONE))?;

    match controller
        .search(id.as_str())
        .await
        .map_err(CliError::reported)?
    {
        SearchOutcome::Found(found) => {
            controller
                .prepare_edit(&found)
                .map_err(CliError::reported)?;
        }
        SearchOutcome::NotFound | SearchOutcome::Skipped => {
            return Err(CliError::RecordNotFound(id.to_string()));
        }
    }
    apply_assignments(&mut controller, &assignments)?;

    let outcome = controller.submit().await.map_err(CliError::reported)?;
    println!("{}", describe_outcome::<R>(&outcome));
    Ok(())
}
