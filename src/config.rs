use serde::{Deserialize, Serialize};
use std::{fmt::Display, path::Path, str::FromStr, time::Duration};

use crate::{Result, TravelError};

pub const ENV_DEFAULT_CURRENCY: &str = "KINU_DEFAULT_CURRENCY";
pub const ENV_LOG_LEVEL: &str = "KINU_LOG_LEVEL";
pub const ENV_CACHE_TTL_SECS: &str = "KINU_CACHE_TTL_SECS";
pub const ENV_CACHE_CAPACITY: &str = "KINU_CACHE_CAPACITY";
pub const ENV_LUGGAGE_ALLOWANCE_GRAMS: &str = "KINU_LUGGAGE_ALLOWANCE_GRAMS";

/// Runtime settings for the CLI and the caching layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Currency assumed when a budget is given without one
    pub default_currency: String,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,

    /// Lifetime of cached allocation results
    pub cache_ttl_secs: u64,

    /// Maximum number of cached allocation results (0 disables the cache)
    pub cache_capacity: usize,

    /// Luggage allowance used when a packing list does not carry one
    pub luggage_allowance_grams: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            log_level: "info".to_string(),
            cache_ttl_secs: 300,
            cache_capacity: 128,
            luggage_allowance_grams: crate::planning::DEFAULT_ALLOWANCE_GRAMS,
        }
    }
}

impl AppConfig {
    /// Load from the process environment, reading a `.env` file first if present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(currency) = lookup(ENV_DEFAULT_CURRENCY) {
            config.default_currency = currency.trim().to_uppercase();
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(raw) = lookup(ENV_CACHE_TTL_SECS) {
            config.cache_ttl_secs = parse_var(ENV_CACHE_TTL_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CACHE_CAPACITY) {
            config.cache_capacity = parse_var(ENV_CACHE_CAPACITY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LUGGAGE_ALLOWANCE_GRAMS) {
            config.luggage_allowance_grams = parse_var(ENV_LUGGAGE_ALLOWANCE_GRAMS, &raw)?;
        }

        Ok(config)
    }

    /// Load from a JSON configuration file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TravelError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            TravelError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| TravelError::Config(format!("{} has invalid value `{}`: {}", name, raw, e)))
}
