use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Settings for a [`ConfigService`](crate::ConfigService).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Recorded as the modifier of every applied change set.
    pub operator: String,
    /// Environment tag copied into audit records.
    pub env: String,
    /// Texts larger than this are rejected before reconciliation.
    pub max_text_bytes: usize,
    /// Accept an empty uploaded file as "clear the namespace".
    pub allow_empty_import: bool,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            operator: "cfgtext".into(),
            env: "DEV".into(),
            max_text_bytes: 1024 * 1024,
            allow_empty_import: false,
        }
    }
}

impl SdkConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> SdkResult<Self> {
        toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Builder-style operator override.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }
}
