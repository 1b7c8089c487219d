//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `ACCOUNT_SERVICE_URL` (required): base URL of the account service, e.g. `http://localhost:8081`
/// - `DATABASE_URL` (optional): PostgreSQL connection string; without it transactions are kept in memory
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `ACCOUNT_SERVICE_TIMEOUT_SECS` (optional): per-call timeout for balance updates, defaults to 5
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub account_service_url: String,

    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_account_service_timeout_secs")]
    pub account_service_timeout_secs: u64,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_account_service_timeout_secs() -> u64 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., ACCOUNT_SERVICE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Load configuration from an explicit set of variables.
    ///
    /// Names are matched the same way as in [`Config::from_env`].
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn account_service_timeout(&self) -> Duration {
        Duration::from_secs(self.account_service_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_missing() {
        let config =
            Config::from_vars(vars(&[("ACCOUNT_SERVICE_URL", "http://localhost:8081")])).unwrap();

        assert_eq!(config.account_service_url, "http://localhost:8081");
        assert_eq!(config.database_url, None);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.account_service_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_vars(vars(&[
            ("ACCOUNT_SERVICE_URL", "http://accounts:8081"),
            ("DATABASE_URL", "postgres://localhost/transactions"),
            ("SERVER_PORT", "8082"),
            ("ACCOUNT_SERVICE_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/transactions")
        );
        assert_eq!(config.server_port, 8082);
        assert_eq!(config.account_service_timeout_secs, 12);
    }

    #[test]
    fn account_service_url_is_required() {
        assert!(Config::from_vars(vars(&[("SERVER_PORT", "8082")])).is_err());
    }
}
