use crate::domain::CurrencyRegistry;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub snapshot_path: String,
    pub currency_registry_path: Option<String>,
    /// Minimum seconds to maturity a market needs to be traded into.
    pub min_time_to_maturity_secs: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let snapshot_path = env_map
            .get("SNAPSHOT_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("SNAPSHOT_PATH".to_string()))?;

        let currency_registry_path = env_map
            .get("CURRENCY_REGISTRY_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let min_time_to_maturity_secs = env_map
            .get("MIN_TIME_TO_MATURITY_SECS")
            .map(|s| s.as_str())
            .unwrap_or("0")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "MIN_TIME_TO_MATURITY_SECS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        Ok(Config {
            snapshot_path,
            currency_registry_path,
            min_time_to_maturity_secs,
        })
    }

    /// Load the currency registry, or an empty one when no path is set.
    pub fn load_currency_registry(&self) -> Result<CurrencyRegistry, ConfigError> {
        let Some(path) = &self.currency_registry_path else {
            return Ok(CurrencyRegistry::default());
        };
        let content = std::fs::read_to_string(path).map_err(|_| {
            ConfigError::InvalidValue(
                "CURRENCY_REGISTRY_PATH".to_string(),
                "file not found or unreadable".to_string(),
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ConfigError::InvalidValue("CURRENCY_REGISTRY_PATH".to_string(), e.to_string())
        })
    }
}
