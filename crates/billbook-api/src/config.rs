use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "BILLBOOK_API_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(BIND_ADDR_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw.parse::<SocketAddr>().map_err(|_| {
            ConfigError::Invalid(format!("{BIND_ADDR_VAR} must be HOST:PORT, got '{raw}'"))
        })?;

        Ok(Self { bind_addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_defaults_to_loopback() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn bind_addr_must_be_a_socket_address() {
        let config = AppConfig::from_lookup(|_| Some(" 0.0.0.0:9000 ".to_string())).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);

        let error = AppConfig::from_lookup(|_| Some("localhost".to_string())).unwrap_err();
        assert!(error.to_string().contains(BIND_ADDR_VAR));
    }
}
