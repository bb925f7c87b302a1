use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::privacy::probe::ProbeMode;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_path: PathBuf,
    pub probe_timeout_ms: u64,
    pub quota_probe: ProbeMode,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            storage_path: require_env("STORAGE_PATH")?.into(),
            probe_timeout_ms: std::env::var("PROBE_TIMEOUT_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse::<u64>()
                .context("PROBE_TIMEOUT_MS must be a millisecond count")?,
            quota_probe: std::env::var("QUOTA_PROBE")
                .unwrap_or_else(|_| "absent".to_string())
                .parse::<ProbeMode>()
                .map_err(|e| anyhow::anyhow!(e))
                .context("QUOTA_PROBE is invalid")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Bound applied to each asynchronous sub-probe of the privacy detector.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
