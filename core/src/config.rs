//! Client configuration.
//!
//! The on-disk shape is the `config.json` used by existing deployments of the
//! SDK: `{"baseURL": "https://..."}`. The URL itself is validated when a
//! client is built from the config, not here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PayError;

/// Environment variable read by `ClientConfig::from_env`.
pub const BASE_URL_ENV: &str = "PAY_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(rename = "baseURL")]
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, PayError> {
        serde_json::from_str(raw).map_err(|e| PayError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PayError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| PayError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn from_env() -> Result<Self, PayError> {
        std::env::var(BASE_URL_ENV)
            .map(Self::new)
            .map_err(|e| PayError::Config(format!("{BASE_URL_ENV}: {e}")))
    }
}
