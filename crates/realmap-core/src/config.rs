// crates/realmap-core/src/config.rs
//! Shared constants and the HTTP client configuration.

use crate::model::FeatureId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest feature id any request may carry.
pub const MAX_FEATURE_ID: FeatureId = 1000;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_URL: &str = "http://localhost:5000/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_HOST: &str = "REALMAP_HOST";
pub const ENV_PORT: &str = "REALMAP_PORT";
pub const ENV_DATA: &str = "REALMAP_DATA";
pub const ENV_API_URL: &str = "REALMAP_API_URL";

/// Where the HTTP query client sends its requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults, with the base url taken from `REALMAP_API_URL` when set.
    pub fn from_env() -> Self {
        match std::env::var(ENV_API_URL) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
