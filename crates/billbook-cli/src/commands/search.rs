use billbook_core::api::{ApiError, HttpRecordsApi, RecordsApi};
use billbook_core::config::ClientConfig;
use billbook_core::Resource;

use crate::commands::common::{normalize_record_id, open_controller};
use crate::error::CliError;
use crate::view::{Regions, TerminalView};

pub async fn run_search<R: Resource>(
    id: &str,
    as_json: bool,
    config: &ClientConfig,
) -> Result<(), CliError> {
    let id = normalize_record_id(id)?;

    if as_json {
        let api = HttpRecordsApi::<R>::from_config(config)?;
        return match api.fetch(&id).await {
            Ok(Some(record)) => {
                println!("{}", serde_json::to_string_pretty(&record)?);
                Ok(())
            }
            Ok(None) | Err(ApiError::Status { .. }) => {
                Err(CliError::RecordNotFound(id.to_string()))
            }
            Err(error) => Err(error.into()),
        };
    }

    let mut controller = open_controller::<R>(config, TerminalView::stdio(Regions::SEARCH))?;
    controller
        .search(id.as_str())
        .await
        .map_err(CliError::reported)?;
    Ok(())
}
