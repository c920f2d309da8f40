//! Application configuration loaded from environment variables.

use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, ServiceError};

/// Port used when `PORT` is absent or unusable.
pub const DEFAULT_PORT: u16 = 3000;

/// Greeting served on `GET /` unless `GREETING` is set.
pub const DEFAULT_GREETING: &str = "Hello from the simple API.";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Raw `PORT` value. Resolved through [`Config::listen_port`].
    #[serde(default)]
    pub port: Option<String>,

    /// Body of the root route.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Log filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: None,
            greeting: default_greeting(),
            rust_log: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Load configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.greeting.trim().is_empty() {
            return Err(ServiceError::InvalidConfig(
                "GREETING must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Port to listen on: a positive command-line value wins over `PORT`.
    pub fn resolve_port(&self, cli: Option<u16>) -> u16 {
        match cli.filter(|port| *port != 0) {
            Some(port) => port,
            None => self.listen_port(),
        }
    }

    /// Port from `PORT` alone. Falls back to [`DEFAULT_PORT`] when `PORT` is
    /// missing or not a positive integer.
    pub fn listen_port(&self) -> u16 {
        match self.port.as_deref() {
            None => DEFAULT_PORT,
            Some(raw) => parse_port(raw).unwrap_or_else(|| {
                warn!(value = raw, default = DEFAULT_PORT, "ignoring invalid PORT");
                DEFAULT_PORT
            }),
        }
    }
}

/// Parse a port value. Zero and anything outside `u16` are rejected.
pub fn parse_port(raw: &str) -> Option<u16> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_vars(vars(&[])).unwrap();

        assert_eq!(config.listen_port(), 3000);
        assert_eq!(config.greeting, DEFAULT_GREETING);
        assert_eq!(config.rust_log, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn reads_port_and_greeting() {
        let config = Config::from_vars(vars(&[
            ("PORT", "8080"),
            ("GREETING", "Hello from rails-ecs minimal app"),
        ]))
        .unwrap();

        assert_eq!(config.listen_port(), 8080);
        assert_eq!(config.greeting, "Hello from rails-ecs minimal app");
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        for raw in ["", "abc", "0", "-1", "65536", "80.5", "80abc"] {
            let config = Config::from_vars(vars(&[("PORT", raw)])).unwrap();
            assert_eq!(config.listen_port(), DEFAULT_PORT, "PORT={raw:?}");
        }
    }

    #[test]
    fn command_line_port_wins_over_environment() {
        let config = Config::from_vars(vars(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.resolve_port(Some(9090)), 9090);
    }

    #[test]
    fn environment_port_used_without_command_line() {
        let config = Config::from_vars(vars(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.resolve_port(None), 8080);
    }

    #[test]
    fn absent_port_resolves_to_default() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.resolve_port(None), DEFAULT_PORT);
    }

    #[test]
    fn invalid_environment_port_resolves_to_default() {
        let config = Config::from_vars(vars(&[("PORT", "abc")])).unwrap();
        assert_eq!(config.resolve_port(None), DEFAULT_PORT);
        assert_eq!(config.resolve_port(Some(0)), DEFAULT_PORT);
    }

    #[test]
    fn parse_port_accepts_full_range() {
        assert_eq!(parse_port("1"), Some(1));
        assert_eq!(parse_port(" 8080 "), Some(8080));
        assert_eq!(parse_port("65535"), Some(65535));
        assert_eq!(parse_port("0"), None);
    }

    #[test]
    fn malformed_log_json_is_a_config_error() {
        let err = Config::from_vars(vars(&[("LOG_JSON", "sometimes")])).unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[test]
    fn validate_rejects_blank_greeting() {
        let config = Config {
            greeting: "   ".to_string(),
            ..Config::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ServiceError::InvalidConfig(_))
        ));
        assert!(Config::default().validate().is_ok());
    }
}
