//! Process configuration, read from environment variables.
//!
//! | Variable                 | Default | Notes                     |
//! |--------------------------|---------|---------------------------|
//! | `PORT`                   | 3000    |                           |
//! | `API_URL`                | -       | required, absolute URL    |
//! | `API_KEY`                | -       | required, departures key  |
//! | `STOP_LOOKUP_API_KEY`    | -       | required, typeahead key   |
//! | `UPSTREAM_TIMEOUT_SECS`  | 10      |                           |
//! | `STATION_CACHE_CAPACITY` | 10000   |                           |
//! | `STATION_CACHE_TTL_SECS` | 86400   |                           |
//!
//! Loading never exits the process; `main` decides what to do with a
//! [`ConfigError`].

use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::cache::CacheConfig;
use crate::sl::SlConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;
const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Errors from reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required variable not set
    #[error("{0} is required")]
    Missing(&'static str),

    /// Variable set but empty
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// Variable is not an absolute URL
    #[error("{name} is not a valid URL ({value:?}): {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Variable is not a number in the accepted range
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on.
    pub port: u16,

    /// Base URL of the SL API.
    pub api_url: Url,

    /// Key for the real-time departures endpoint.
    pub api_key: String,

    /// Key for the station typeahead endpoint.
    pub stop_lookup_api_key: String,

    /// Timeout for each upstream request.
    pub upstream_timeout: Duration,

    /// Maximum number of cached station lookups.
    pub station_cache_capacity: u64,

    /// How long a cached station lookup stays valid.
    pub station_cache_ttl: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = optional_number(&lookup, "PORT", DEFAULT_PORT, "an integer port 0-65535")?;

        let api_url = required(&lookup, "API_URL")?;
        let api_url = Url::parse(&api_url).map_err(|e| ConfigError::InvalidUrl {
            name: "API_URL",
            value: api_url.clone(),
            reason: e.to_string(),
        })?;

        let api_key = required(&lookup, "API_KEY")?;
        let stop_lookup_api_key = required(&lookup, "STOP_LOOKUP_API_KEY")?;

        let timeout_secs = positive(&lookup, "UPSTREAM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let station_cache_capacity =
            positive(&lookup, "STATION_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;
        let cache_ttl_secs = positive(&lookup, "STATION_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;

        Ok(Self {
            port,
            api_url,
            api_key,
            stop_lookup_api_key,
            upstream_timeout: Duration::from_secs(timeout_secs),
            station_cache_capacity,
            station_cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }

    /// Settings for the SL client.
    pub fn sl_config(&self) -> SlConfig {
        SlConfig::new(
            self.api_url.as_str(),
            &self.api_key,
            &self.stop_lookup_api_key,
        )
        .with_timeout(self.upstream_timeout)
    }

    /// Settings for the station lookup cache.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.station_cache_ttl,
            max_capacity: self.station_cache_capacity,
        }
    }
}

/// A required, non-empty variable.
fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Err(ConfigError::Missing(name)),
        Some(value) if value.is_empty() => Err(ConfigError::Empty(name)),
        Some(value) => Ok(value),
    }
}

/// An optional number; unset falls back to `default`.
fn optional_number<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            name,
            value,
            expected,
        }),
    }
}

/// An optional number that must be greater than zero.
fn positive<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const EXPECTED: &str = "a positive integer";

    let value = optional_number(lookup, name, default, EXPECTED)?;
    if value == 0 {
        return Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
            expected: EXPECTED,
        });
    }
    Ok(value)
}
