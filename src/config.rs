//! Client configuration
//!
//! The backend base address is injected here once at startup and handed to
//! the HTTP client; nothing reads it from global state afterwards.

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Environment variable holding the backend base URL (read by the CLI)
pub const API_URL_ENV: &str = "ASSASSIN_API_URL";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "ASSASSIN_TIMEOUT_SECS";

/// Default backend address (the backend's dev server)
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend connection settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    /// Timeout for ordinary calls; email dispatch is left unbounded
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config from a base URL string
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(api_url.trim())
            .map_err(|e| Error::Config(format!("invalid API URL {api_url:?}: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API URL must be http or https, got {}",
                base_url.scheme()
            )));
        }

        // Keep any path prefix when joining endpoint paths
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url, timeout })
    }

    /// Base URL, always ending in `/`
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path (without leading slash) against the base
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("invalid endpoint {path:?}: {e}")))
    }
}
