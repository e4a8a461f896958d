//! Environment-driven configuration.

use std::time::Duration;

use anyhow::{Context, Result};

/// Runtime settings, read from the environment (a `.env` file is honored).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the curation persistence API.
    pub api_base: String,

    /// Read-through proxy endpoint for marketplace page fetches.
    pub proxy_base: String,

    /// Per-request deadline for proxy fetches.
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base =
            std::env::var("CURATION_API_BASE").unwrap_or_else(|_| "http://localhost:5000".into());

        let proxy_base = std::env::var("CURATION_PROXY_BASE")
            .unwrap_or_else(|_| product_extractor::proxy::DEFAULT_PROXY_BASE.into());

        let fetch_timeout = match std::env::var("CURATION_FETCH_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("CURATION_FETCH_TIMEOUT_SECS must be a number of seconds")?,
            ),
            Err(_) => product_extractor::proxy::DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_base,
            proxy_base,
            fetch_timeout,
        })
    }
}
