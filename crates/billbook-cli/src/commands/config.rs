use std::env;

use billbook_core::config::{normalize_base_url, ClientConfig, BASE_URL_VAR, RESOURCE_VAR};
use billbook_core::util::normalize_text_option;
use billbook_core::ResourceKind;

use crate::cli::{ConfigCommands, ResourceArg};
use crate::commands::common::resolve_client_config_with;
use crate::config_profiles::{default_config_path, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    base_url: Option<&str>,
    resource: Option<ResourceArg>,
    profile: Option<&str>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init { no_activate } => {
            run_config_init(profile, base_url, resource, no_activate)
        }
        ConfigCommands::Show => run_config_show(profile, base_url, resource),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    base_url: Option<&str>,
    resource: Option<ResourceArg>,
    no_activate: bool,
) -> Result<(), CliError> {
    let path = default_config_path().map_err(CliError::Config)?;
    let mut config = CliProfilesConfig::load_from_path(&path).map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    init_profile(
        &mut config,
        &profile_name,
        base_url,
        resource,
        no_activate,
        |name| env::var(name).ok(),
    )?;

    config.save_to_path(&path).map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let missing_fields = config
        .profile(&profile_name)
        .map(|profile| {
            let mut missing = Vec::new();
            if profile.base_url().is_none() {
                missing.push("base_url");
            }
            if profile.resource().is_none() {
                missing.push("resource");
            }
            missing
        })
        .unwrap_or_default();
    if !missing_fields.is_empty() {
        println!(
            "Profile '{}' falls back to defaults for: {}",
            profile_name,
            missing_fields.join(", ")
        );
    }

    Ok(())
}

/// Merge explicit values, then the environment, over the stored profile.
pub fn init_profile(
    config: &mut CliProfilesConfig,
    profile_name: &str,
    base_url: Option<&str>,
    resource: Option<ResourceArg>,
    no_activate: bool,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), CliError> {
    let existing = config.profile(profile_name).cloned().unwrap_or_default();

    let merged_base_url = normalize_text_option(base_url.map(str::to_string))
        .or_else(|| normalize_text_option(env_lookup(BASE_URL_VAR)))
        .or_else(|| existing.base_url())
        .map(|url| normalize_base_url(&url))
        .transpose()?;
    let merged_resource = resource
        .map(ResourceArg::kind)
        .map(Ok)
        .or_else(|| {
            normalize_text_option(env_lookup(RESOURCE_VAR))
                .or_else(|| existing.resource())
                .map(|raw| raw.parse::<ResourceKind>())
        })
        .transpose()?;

    let profile = config.profile_mut_or_default(profile_name);
    if let Some(value) = merged_base_url {
        profile.base_url = Some(value);
    }
    if let Some(value) = merged_resource {
        profile.resource = Some(value.as_str().to_string());
    }

    if !no_activate {
        config.active_profile = Some(profile_name.to_string());
    }
    Ok(())
}

pub fn run_config_show(
    profile_name: Option<&str>,
    base_url: Option<&str>,
    resource: Option<ResourceArg>,
) -> Result<(), CliError> {
    let path = default_config_path().map_err(CliError::Config)?;
    let config = CliProfilesConfig::load_from_path(&path).map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();
    let effective =
        resolve_client_config_with(base_url, resource, &profile, |name| env::var(name).ok())?;

    println!("config: {}", path.display());
    for line in format_settings(&profile_name, &effective) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_settings(profile_name: &str, config: &ClientConfig) -> Vec<String> {
    vec![
        format!("profile: {profile_name}"),
        format!("base_url: {}", config.base_url),
        format!("resource: {}", config.resource),
        format!(
            "timeout: {}",
            config
                .timeout
                .map_or_else(|| "none".to_string(), |timeout| format!("{}s", timeout.as_secs()))
        ),
        format!(
            "utc_offset: {}",
            config
                .utc_offset
                .map_or_else(|| "system".to_string(), |offset| offset.to_string())
        ),
    ]
}
