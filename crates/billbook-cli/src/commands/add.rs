use billbook_core::config::ClientConfig;
use billbook_core::Resource;

use crate::commands::common::{
    apply_assignments, describe_outcome, open_controller, parse_assignments,
};
use crate::error::CliError;
use crate::view::{Regions, TerminalView};

pub async fn run_add<R: Resource>(
    assignments: &[String],
    config: &ClientConfig,
) -> Result<(), CliError> {
    let assignments = parse_assignments(assignments)?;
    let mut controller = open_controller::<R>(config, TerminalView::stdio(Regions::NONE))?;
    apply_assignments(&mut controller, &assignments)?;

    let outcome = controller.submit().await.map_err(CliError::reported)?;
    println!("{}", describe_outcome::<R>(&outcome));
    Ok(())
}
