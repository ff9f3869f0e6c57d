//! Server settings
//!
//! JSON settings file loaded at startup; every field has a default so a
//! missing file just means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Result, ServerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Address the HTTP surface binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Outbound relay ceiling, seconds
    #[serde(default = "default_relay_timeout_secs")]
    pub relay_timeout_secs: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_relay_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            relay_timeout_secs: default_relay_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from the default path, or fall back to defaults.
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&default_settings_path())
    }

    /// Load settings from a specific path, or fall back to defaults when
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(ServerError::ReadSettings)?;
            let settings = serde_json::from_str(&content).map_err(ServerError::ParseSettings)?;
            info!("Loaded settings from {:?}", path);
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }
}

/// Default settings file path, relative to the working directory.
pub fn default_settings_path() -> PathBuf {
    PathBuf::from("esocial-bridge.json")
}
