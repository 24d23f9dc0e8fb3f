//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ENGINE_URL` - Base URL of the commerce engine (default: `http://localhost:8000`)
//! - `FEED_CACHE_TTL_SECS` - Product feed cache TTL in seconds (default: 60)
//! - `ENGINE_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//!
//! Configuration is resolved once at startup and never mutated at runtime.

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_ENGINE_URL: &str = "http://localhost:8000";
const DEFAULT_FEED_CACHE_TTL_SECS: u64 = 60;
const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Trendfront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the commerce engine
    pub engine_url: Url,
    /// How long a fetched product feed may be served from cache
    pub feed_cache_ttl: Duration,
    /// Per-request timeout for engine calls
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let engine_url = get_env_or_default("ENGINE_URL", DEFAULT_ENGINE_URL);
        let engine_url = parse_url("ENGINE_URL", &engine_url)?;
        let feed_cache_ttl = get_secs_or_default("FEED_CACHE_TTL_SECS", DEFAULT_FEED_CACHE_TTL_SECS)?;
        let request_timeout = get_secs_or_default("ENGINE_TIMEOUT_SECS", DEFAULT_ENGINE_TIMEOUT_SECS)?;

        Ok(Self {
            engine_url,
            feed_cache_ttl,
            request_timeout,
        })
    }
}

impl Default for ClientConfig {
    /// Local-development defaults, identical to an empty environment.
    fn default() -> Self {
        Self {
            engine_url: Url::parse(DEFAULT_ENGINE_URL).expect("default engine URL is valid"),
            feed_cache_ttl: Duration::from_secs(DEFAULT_FEED_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_ENGINE_TIMEOUT_SECS),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a URL-valued variable.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Read a seconds-valued variable, falling back to a default when unset.
fn get_secs_or_default(key: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => parse_secs(key, &raw),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

/// Parse a seconds value into a `Duration`.
fn parse_secs(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
