use std::env;
use std::io::{BufRead, Stderr, StdinLock, Stdout, Write};

use billbook_core::api::{HttpRecordsApi, RecordsApi};
use billbook_core::config::{ClientConfig, BASE_URL_VAR, RESOURCE_VAR};
use billbook_core::util::normalize_text_option;
use billbook_core::{FormController, RecordId, Resource, SubmitOutcome};

use crate::cli::ResourceArg;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;
use crate::view::TerminalView;

pub type StdioView = TerminalView<Stdout, Stderr, StdinLock<'static>>;
pub type TerminalController<R> = FormController<R, HttpRecordsApi<R>, StdioView>;

/// Effective client settings: flag, then environment, then profile, then default.
pub fn resolve_client_config(
    base_url: Option<&str>,
    resource: Option<ResourceArg>,
    profile: Option<&str>,
) -> Result<ClientConfig, CliError> {
    let profiles = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = profiles.resolve_profile_name(profile);
    tracing::debug!("Using CLI profile '{}'", profile_name);
    let profile = profiles.profile(&profile_name).cloned().unwrap_or_default();

    resolve_client_config_with(base_url, resource, &profile, |name| env::var(name).ok())
}

pub fn resolve_client_config_with(
    base_url: Option<&str>,
    resource: Option<ResourceArg>,
    profile: &CliProfile,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, CliError> {
    let flag_base_url = normalize_text_option(base_url.map(str::to_string));
    let flag_resource = resource.map(|resource| resource.kind().as_str().to_string());

    let config = ClientConfig::from_lookup(|name| {
        let (flag, from_profile) = match name {
            BASE_URL_VAR => (flag_base_url.clone(), profile.base_url()),
            RESOURCE_VAR => (flag_resource.clone(), profile.resource()),
            _ => (None, None),
        };
        flag.or_else(|| normalize_text_option(env_lookup(name)))
            .or(from_profile)
    })?;
    Ok(config)
}

pub fn open_controller<R: Resource>(
    config: &ClientConfig,
    view: StdioView,
) -> Result<TerminalController<R>, CliError> {
    let api = HttpRecordsApi::<R>::from_config(config)?;
    Ok(FormController::new(api, view, config.clock()))
}

/// Split `field=value` arguments; the value may itself contain `=`.
pub fn parse_assignments(raw: &[String]) -> Result<Vec<(String, String)>, CliError> {
    raw.iter()
        .map(|assignment| {
            let (field, value) = assignment
                .split_once('=')
                .ok_or_else(|| CliError::InvalidAssignment(assignment.clone()))?;
            let field = field.trim();
            if field.is_empty() {
                return Err(CliError::InvalidAssignment(assignment.clone()));
            }
            Ok((field.to_string(), value.to_string()))
        })
        .collect()
}

pub fn apply_assignments<R, A, W, E, I>(
    controller: &mut FormController<R, A, TerminalView<W, E, I>>,
    assignments: &[(String, String)],
) -> Result<(), CliError>
where
    R: Resource,
    A: RecordsApi<R>,
    W: Write,
    E: Write,
    I: BufRead,
{
    for (field, value) in assignments {
        controller
            .set_field(field, value.as_str())
            .map_err(CliError::reported)?;
    }
    Ok(())
}

pub fn normalize_record_id(id: &str) -> Result<RecordId, CliError> {
    if id.trim().is_empty() {
        return Err(CliError::EmptyRecordId);
    }
    Ok(RecordId::parse(id)?)
}

pub fn describe_outcome<R: Resource>(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Created(Some(id)) => format!("Created {} {id}", R::NOUN),
        SubmitOutcome::Created(None) => format!("Created {}", R::NOUN),
        SubmitOutcome::Updated(id) => format!("Updated {} {id}", R::NOUN),
    }
}
