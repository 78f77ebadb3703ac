//! Service-level sections: `[engine]`, `[server]`, `[logging]`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Delegated consensus engine (`[engine]`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Endpoint of the multi-agent engine; when set, consensus is delegated
    pub url: Option<String>,
}

impl FileEngineConfig {
    /// Configured URL, ignoring blank values
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// HTTP API (`[server]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Listen address (default: "127.0.0.1:8000")
    pub bind: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Transcript logging (`[logging]`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript file; disabled when unset
    pub transcript_path: Option<PathBuf>,
}
