//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (development, production)
    pub environment: String,

    /// Emit logs as JSON instead of human-readable lines
    pub log_json: bool,

    /// Initial balance used by the demo scenario
    pub demo_initial_balance: Decimal,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let log_json = env::var("LOG_JSON")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("LOG_JSON"))?;

        let demo_initial_balance = Decimal::from_str(
            &env::var("DEMO_INITIAL_BALANCE").unwrap_or_else(|_| "1000".to_string()),
        )
        .map_err(|_| ConfigError::InvalidValue("DEMO_INITIAL_BALANCE"))?;

        Ok(Self {
            environment,
            log_json,
            demo_initial_balance,
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
