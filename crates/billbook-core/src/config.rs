//! Client configuration resolved from the environment.

use std::collections::HashMap;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::FixedOffset;
use regex::Regex;

use crate::error::{Error, Result};
use crate::resource::ResourceKind;
use crate::time::Clock;
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const BASE_URL_VAR: &str = "BILLBOOK_BASE_URL";
pub const RESOURCE_VAR: &str = "BILLBOOK_RESOURCE";
pub const TIMEOUT_VAR: &str = "BILLBOOK_TIMEOUT_SECS";
pub const UTC_OFFSET_VAR: &str = "BILLBOOK_UTC_OFFSET";

const MAX_TIMEOUT_SECS: u64 = 3_600;

/// Where the backend lives and how local times are read and shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub resource: ResourceKind,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Offset for form input and display; `None` uses the system offset.
    pub utc_offset: Option<FixedOffset>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            resource: ResourceKind::default(),
            timeout: None,
            utc_offset: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = match optional_trimmed(&lookup, BASE_URL_VAR) {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let resource = optional_trimmed(&lookup, RESOURCE_VAR)
            .map(|raw| raw.parse::<ResourceKind>())
            .transpose()?
            .unwrap_or_default();

        let timeout = optional_trimmed(&lookup, TIMEOUT_VAR)
            .map(|raw| parse_timeout_secs(&raw))
            .transpose()?;

        let utc_offset = optional_trimmed(&lookup, UTC_OFFSET_VAR)
            .map(|raw| parse_utc_offset(&raw))
            .transpose()?;

        Ok(Self {
            base_url,
            resource,
            timeout,
            utc_offset,
        })
    }

    /// Clock in the configured offset, or the system offset when unset.
    pub fn clock(&self) -> Clock {
        self.utc_offset.map_or_else(Clock::system, Clock::with_offset)
    }
}

/// Trim a base URL and drop trailing slashes; it must be http(s).
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let value = normalize_text_option(Some(raw.to_string()))
        .ok_or_else(|| Error::Config("base URL must not be empty".to_string()))?;
    if !is_http_url(&value) {
        return Err(Error::Config(format!(
            "base URL '{value}' must start with http:// or https://"
        )));
    }
    Ok(value.trim_end_matches('/').to_string())
}

/// Parse `Z`, `UTC`, `+HH`, `+HHMM` or `+HH:MM` (and the `-` forms).
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    static OFFSET: OnceLock<Regex> = OnceLock::new();
    let re = OFFSET.get_or_init(|| {
        Regex::new(r"^([+-])(\d{2})(?::?(\d{2}))?$").expect("Invalid regex")
    });

    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0)
            .ok_or_else(|| Error::Config("invalid UTC offset".to_string()));
    }

    let invalid = || Error::Config(format!("{UTC_OFFSET_VAR} must look like +HH:MM, got '{raw}'"));
    let captures = re.captures(raw).ok_or_else(invalid)?;
    let hours: i32 = captures[2].parse().map_err(|_| invalid())?;
    let minutes: i32 = captures
        .get(3)
        .map_or(Ok(0), |value| value.as_str().parse())
        .map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    let seconds = (hours * 60 + minutes) * 60;
    let seconds = if &captures[1] == "-" { -seconds } else { seconds };
    FixedOffset::east_opt(seconds).ok_or_else(invalid)
}

fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs = raw.parse::<u64>().map_err(|_| {
        Error::Config(format!(
            "{TIMEOUT_VAR} must be an integer in [1, {MAX_TIMEOUT_SECS}]"
        ))
    })?;
    if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(Error::Config(format!(
            "{TIMEOUT_VAR} must be in [1, {MAX_TIMEOUT_SECS}]"
        )));
    }
    Ok(Duration::from_secs(secs))
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    normalize_text_option(lookup(name))
}
