use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub mount_lights: Option<bool>,
    /// Ains of bulbs that must not be exposed.
    pub ignored_devices: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mount_lights: Some(true),
            ignored_devices: None,
        }
    }
}

impl Settings {
    /// Reads the settings file, falling back to defaults when it cannot be
    /// read. A file with invalid content is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Invalid settings file {}", path.display())),
            Err(e) => {
                warn!("Failed to read settings file {}, using default settings: {e}", path.display());
                Ok(Settings::default())
            }
        }
    }
}
