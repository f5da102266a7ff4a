use billbook_core::api::{HttpRecordsApi, RecordsApi};
use billbook_core::config::ClientConfig;
use billbook_core::Resource;

use crate::commands::common::open_controller;
use crate::error::CliError;
use crate::view::{Regions, TerminalView};

pub async fn run_list<R: Resource>(config: &ClientConfig, as_json: bool) -> Result<(), CliError> {
    if as_json {
        let api = HttpRecordsApi::<R>::from_config(config)?;
        let records = api.list().await?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let mut controller = open_controller::<R>(config, TerminalView::stdio(Regions::LIST))?;
    controller.load_list().await.map_err(CliError::reported)?;
    Ok(())
}
