use billbook_core::config::ClientConfig;
use billbook_core::{DeleteOutcome, Resource};

use crate::commands::common::{normalize_record_id, open_controller};
use crate::error::CliError;
use crate::view::{Regions, TerminalView};

pub async fn run_delete<R: Resource>(
    id: &str,
    assume_yes: bool,
    config: &ClientConfig,
) -> Result<(), CliError> {
    let id = normalize_record_id(id)?;
    let view = TerminalView::stdio(Regions::NONE).assume_yes(assume_yes);
    let mut controller = open_controller::<R>(config, view)?;

    match controller.delete(&id).await.map_err(CliError::reported)? {
        DeleteOutcome::Deleted => println!("{id}"),
        DeleteOutcome::Cancelled => eprintln!("Cancelled"),
    }
    Ok(())
}
