//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Values that can be wrong are kept as strings and parsed on demand so
//! that [`FileConfig::validate`] can report all problems at once.

mod backend;
mod providers;
mod service;

pub use backend::FileBackendConfig;
pub use providers::{
    FileProviderConfig, FileProvidersConfig, ProviderKind, default_base_url, default_model,
};
pub use service::{FileEngineConfig, FileLoggingConfig, FileServerConfig};

use quorum_desk_application::OrchestratorConfig;
use quorum_desk_domain::{Backend, ConfigIssue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default backend, verbosity and consensus behavior
    pub backend: FileBackendConfig,
    /// Per-backend client settings
    pub providers: FileProvidersConfig,
    /// Delegated consensus engine
    pub engine: FileEngineConfig,
    /// HTTP API settings
    pub server: FileServerConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.backend.parse_default().1);
        issues.extend(self.backend.parse_verbosity().1);
        issues.extend(self.backend.parse_consensus().1);
        issues.extend(self.backend.validate_timeout());

        for (name, provider) in &self.providers {
            issues.extend(provider.parse_kind(name).1);
        }

        issues
    }

    /// Backends that need a client: the default, the consensus set and any
    /// backend with a `[providers]` entry, in that order without repeats.
    pub fn backends(&self) -> Vec<Backend> {
        let mut backends = vec![self.backend.parse_default().0];
        backends.extend(self.backend.parse_consensus().0);
        backends.extend(
            self.providers
                .keys()
                .filter(|name| !name.trim().is_empty())
                .filter_map(|name| name.parse::<Backend>().ok()),
        );

        let mut unique: Vec<Backend> = Vec::with_capacity(backends.len());
        for backend in backends {
            if !unique.contains(&backend) {
                unique.push(backend);
            }
        }
        unique
    }

    /// Provider settings for a backend (stub defaults when absent).
    ///
    /// Lookup ignores case so `[providers.Claude]` configures `claude`.
    pub fn provider(&self, backend: &Backend) -> FileProviderConfig {
        self.providers
            .iter()
            .find(|(name, _)| name.parse::<Backend>().ok().as_ref() == Some(backend))
            .map(|(_, config)| config.clone())
            .unwrap_or_default()
    }

    /// Orchestrator parameters; invalid values fall back to defaults.
    pub fn to_orchestrator_config(&self) -> OrchestratorConfig {
        let backend = &self.backend;
        OrchestratorConfig::default()
            .with_default_backend(backend.parse_default().0)
            .with_default_verbosity(backend.parse_verbosity().0)
            .with_voting(backend.voting)
            .with_consensus(backend.parse_consensus().0)
            .with_request_timeout(Duration::from_secs(backend.timeout_seconds.max(1)))
            .with_parallel_consensus(backend.parallel_consensus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_desk_domain::Verbosity;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[backend]
default = "claude"
verbosity = "balanced"
consensus = ["claude", "mistral"]
voting = false
timeout_seconds = 15
parallel_consensus = true

[providers.claude]
kind = "anthropic"
api_key_env = "CLAUDE_KEY"
max_tokens = 1024

[providers.mistral]
kind = "openai"
base_url = "http://localhost:9000/v1"

[engine]
url = "http://localhost:7000/consensus"

[server]
bind = "0.0.0.0:9090"

[logging]
transcript_path = "/tmp/quorum-desk.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());
        assert_eq!(config.backend.default, "claude");
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.provider(&Backend::Claude).max_tokens, Some(1024));
        assert_eq!(config.engine.url(), Some("http://localhost:7000/consensus"));
        assert_eq!(config.server.bind, "0.0.0.0:9090");
        assert!(config.logging.transcript_path.is_some());

        let orchestrator = config.to_orchestrator_config();
        assert_eq!(orchestrator.default_backend, Backend::Claude);
        assert_eq!(orchestrator.default_verbosity, Verbosity::Balanced);
        assert_eq!(orchestrator.consensus, vec![Backend::Claude, Backend::Mistral]);
        assert!(!orchestrator.voting_enabled);
        assert!(orchestrator.parallel_consensus);
        assert_eq!(orchestrator.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[backend]
verbosity = "verbose"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.parse_verbosity().0, Verbosity::Verbose);
        // Defaults should apply
        assert_eq!(config.backend.default, "gpt5");
        assert!(config.backend.voting);
        assert!(config.providers.is_empty());
        assert_eq!(config.engine.url(), None);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(
            config.backends(),
            vec![Backend::Gpt5, Backend::Claude, Backend::Mistral]
        );
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_backends_include_provider_entries() {
        let mut config = FileConfig::default();
        config
            .providers
            .insert("gemini".to_string(), FileProviderConfig::default());
        config
            .providers
            .insert("Claude".to_string(), FileProviderConfig::default());
        assert_eq!(
            config.backends(),
            vec![
                Backend::Gpt5,
                Backend::Claude,
                Backend::Mistral,
                Backend::Gemini
            ]
        );
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let toml_str = r#"
[backend]
default = ""
verbosity = "ultra"
timeout_seconds = 0

[providers.gpt5]
kind = "bedrock"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().all(|i| i.is_error()));
    }

    #[test]
    fn test_blank_engine_url_is_ignored() {
        let config = FileConfig {
            engine: FileEngineConfig {
                url: Some("  ".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(config.engine.url(), None);
    }
}
