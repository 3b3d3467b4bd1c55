//! Configuration types for the embedding side of the bridge.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the embedding protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Preferred native-ops backend ("auto", "xdotool", "powershell")
    pub backend: String,
    /// Liveness poll interval in milliseconds, used when the host
    /// application has no destruction notification of its own
    pub liveness_poll_ms: u64,
    /// Transfer keyboard focus to the surface right after attaching
    pub focus_on_attach: bool,
}

impl EmbedConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EmbedConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        match self.backend.as_str() {
            "auto" | "xdotool" | "powershell" => {}
            other => {
                return Err(Error::Config(format!("unknown backend '{other}'")));
            }
        }

        if self.liveness_poll_ms == 0 {
            return Err(Error::Config(
                "liveness_poll_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            backend: "auto".to_string(),
            liveness_poll_ms: 500,
            focus_on_attach: true,
        }
    }
}
