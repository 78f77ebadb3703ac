//! Provider configuration from TOML (`[providers.<backend>]` sections)

use quorum_desk_domain::{Backend, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a backend's client is implemented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Deterministic local client, no network
    Stub,
    /// OpenAI-compatible chat completions endpoint
    OpenAi,
    /// Anthropic messages endpoint
    Anthropic,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::Stub, ProviderKind::OpenAi, ProviderKind::Anthropic];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Stub => "stub",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Environment variable consulted when `api_key_env` is not set.
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Stub => None,
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stub" => Ok(ProviderKind::Stub),
            "openai" | "openai-compatible" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(other.to_string()),
        }
    }
}

/// Settings for one backend's client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// "stub" (default), "openai" or "anthropic"
    pub kind: String,
    /// API base URL; each kind has a default
    pub base_url: Option<String>,
    /// Upstream model name; defaults per backend
    pub model: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    /// Cap on output tokens, applied on top of the verbosity budget
    pub max_tokens: Option<u32>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Stub.as_str().to_string(),
            base_url: None,
            model: None,
            api_key_env: None,
            api_key: None,
            max_tokens: None,
        }
    }
}

impl FileProviderConfig {
    pub fn parse_kind(&self, backend: &str) -> (ProviderKind, Vec<ConfigIssue>) {
        match self.kind.parse::<ProviderKind>() {
            Ok(kind) => (kind, vec![]),
            Err(value) => {
                let field = format!("providers.{}.kind", backend);
                (
                    ProviderKind::Stub,
                    vec![ConfigIssue::error(
                        ConfigIssueCode::InvalidEnumValue {
                            field: field.clone(),
                            value: value.clone(),
                            valid_values: ProviderKind::ALL
                                .iter()
                                .map(|k| k.as_str().to_string())
                                .collect(),
                        },
                        format!("{}: unknown provider kind '{}'", field, value),
                    )],
                )
            }
        }
    }

    /// Environment variable that should hold the API key, if any.
    pub fn key_env(&self, kind: ProviderKind) -> Option<String> {
        self.api_key_env
            .clone()
            .or_else(|| kind.default_api_key_env().map(str::to_string))
    }

    /// API key from the config or the environment (looked up via `lookup`).
    pub fn resolve_api_key(
        &self,
        kind: ProviderKind,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.key_env(kind)
                    .and_then(|name| lookup(&name))
                    .filter(|k| !k.trim().is_empty())
            })
    }
}

/// `[providers]` table keyed by backend name
pub type FileProvidersConfig = BTreeMap<String, FileProviderConfig>;

/// Default upstream base URL for a backend served by `kind`.
pub fn default_base_url(kind: ProviderKind, backend: &Backend) -> &'static str {
    match (kind, backend) {
        (ProviderKind::Anthropic, _) => "https://api.anthropic.com/v1",
        (_, Backend::Mistral) => "https://api.mistral.ai/v1",
        (_, Backend::Gemini) => "https://generativelanguage.googleapis.com/v1beta/openai",
        _ => "https://api.openai.com/v1",
    }
}

/// Default upstream model name for a backend.
pub fn default_model(backend: &Backend) -> String {
    match backend {
        Backend::Gpt5 => "gpt-5".to_string(),
        Backend::Claude => "claude-sonnet-4-5".to_string(),
        Backend::Mistral => "mistral-large-latest".to_string(),
        Backend::Gemini => "gemini-2.5-flash".to_string(),
        Backend::Custom(name) => name.clone(),
    }
}
