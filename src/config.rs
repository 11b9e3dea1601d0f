//! Configuration Module
//!
//! Handles loading and managing configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which store implementation backs the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// In-process store owned by a single worker task
    Memory,
    /// Entries kept in a Redis hash
    Redis,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "redis" => Ok(Backend::Redis),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Store implementation
    pub backend: Backend,
    /// Redis connection URL
    pub redis_url: String,
    /// Redis hash holding the entries
    pub redis_namespace: String,
    /// Timeout for each remote call in milliseconds
    pub remote_timeout_ms: u64,
    /// Persistence document; None disables load/save
    pub data_file: Option<PathBuf>,
    /// Seconds between autosaves, 0 disables
    pub autosave_interval: u64,
    /// Required Authorization header value; None disables auth
    pub auth_token: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379)
    /// - `REDIS_NAMESPACE` - Hash name (default: dictionary)
    /// - `REMOTE_TIMEOUT_MS` - Remote call timeout (default: 2000)
    /// - `DATA_FILE` - Persistence document path (default: unset)
    /// - `AUTOSAVE_INTERVAL` - Autosave frequency in seconds (default: 0)
    /// - `AUTH_TOKEN` - Required Authorization header (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            backend: parse_var("STORE_BACKEND").unwrap_or(defaults.backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            redis_namespace: env::var("REDIS_NAMESPACE").unwrap_or(defaults.redis_namespace),
            remote_timeout_ms: parse_var("REMOTE_TIMEOUT_MS")
                .unwrap_or(defaults.remote_timeout_ms),
            data_file: non_empty_var("DATA_FILE").map(PathBuf::from),
            autosave_interval: parse_var("AUTOSAVE_INTERVAL")
                .unwrap_or(defaults.autosave_interval),
            auth_token: non_empty_var("AUTH_TOKEN"),
        }
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            backend: Backend::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            redis_namespace: "dictionary".to_string(),
            remote_timeout_ms: 2000,
            data_file: None,
            autosave_interval: 0,
            auth_token: None,
        }
    }
}
