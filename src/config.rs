#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::Level;

use crate::constants::{FETCH_TIMEOUT_SECS, RAW_CONTENT_BASE};

/// Runtime configuration shared across the crate.
#[derive(Debug)]
pub struct ConfigState {
    /// Shared reqwest HTTP client reused for every fetch.
    http_client:   Client,
    /// Upper bound on a single fetch attempt.
    fetch_timeout: Duration,
    /// Base that raw repository files are served from.
    raw_base:      String,
    /// Verbosity for the terminal log output.
    log_level:     Level,
}

impl ConfigState {
    /// Construct a new configuration instance from the environment.
    fn new() -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to construct shared HTTP client")?;

        let raw_base = std::env::var("PAGEGRADE_RAW_BASE")
            .map(|value| value.trim().trim_end_matches('/').to_owned())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| RAW_CONTENT_BASE.to_string());

        Ok(Self {
            http_client,
            fetch_timeout: read_timeout_secs("PAGEGRADE_FETCH_TIMEOUT_SECS", FETCH_TIMEOUT_SECS),
            raw_base,
            log_level: parse_log_level(std::env::var("PAGEGRADE_LOG").ok()),
        })
    }

    /// Returns a clone of the shared reqwest HTTP client.
    pub fn http_client(&self) -> Client {
        self.http_client.clone()
    }

    /// Returns the per-attempt fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Returns the raw-content base URL.
    pub fn raw_base(&self) -> &str {
        &self.raw_base
    }

    /// Returns the log verbosity.
    pub fn log_level(&self) -> Level {
        self.log_level
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone, Debug)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Ensure the global configuration has been initialized and return a handle.
pub fn ensure_initialized() -> Result<ConfigHandle> {
    let mut guard = slot()
        .lock()
        .map_err(|_| anyhow::anyhow!("config slot poisoned"))?;
    if let Some(cfg) = guard.as_ref() {
        return Ok(ConfigHandle(Arc::clone(cfg)));
    }

    let cfg = Arc::new(ConfigState::new()?);
    *guard = Some(Arc::clone(&cfg));
    Ok(ConfigHandle(cfg))
}

/// Parses the optional log level value, defaulting to `INFO` when unset or
/// unrecognised.
fn parse_log_level(val: Option<String>) -> Level {
    match val
        .map(|s| s.trim().to_ascii_lowercase())
        .as_deref()
        .unwrap_or("info")
    {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Parses an environment variable into a `Duration`, falling back to
/// `default_secs` when parsing fails, the value is zero or the variable is
/// missing.
fn read_timeout_secs(env: &str, default_secs: u64) -> Duration {
    std::env::var(env)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default_secs))
}
