//! Backend selection and consensus settings (`[backend]` section)

use quorum_desk_domain::{Backend, ConfigIssue, ConfigIssueCode, Verbosity};
use serde::{Deserialize, Serialize};

/// Raw `[backend]` section.
///
/// Names are kept as strings so that [`validate`](super::FileConfig::validate)
/// can report every bad value instead of failing on the first one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Selector fallback for unrecognized task types (default: "gpt5")
    pub default: String,
    /// Verbosity used when a request does not name one (default: "minimal")
    pub verbosity: String,
    /// Standalone consensus set, in emission order
    pub consensus: Vec<String>,
    /// Emit a vote after each consensus answer
    pub voting: bool,
    /// Upper bound for each backend call, in seconds
    pub timeout_seconds: u64,
    /// Query consensus backends concurrently
    pub parallel_consensus: bool,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            default: Backend::default().to_string(),
            verbosity: Verbosity::default().to_string(),
            consensus: Backend::default_consensus()
                .iter()
                .map(ToString::to_string)
                .collect(),
            voting: true,
            timeout_seconds: 60,
            parallel_consensus: false,
        }
    }
}

impl FileBackendConfig {
    /// Parse `backend.default`; an empty name falls back to the built-in default.
    pub fn parse_default(&self) -> (Backend, Vec<ConfigIssue>) {
        match parse_backend("backend.default", &self.default) {
            Ok(backend) => (backend, vec![]),
            Err(issue) => (Backend::default(), vec![issue]),
        }
    }

    /// Parse `backend.verbosity`; unknown values fall back to `minimal`.
    pub fn parse_verbosity(&self) -> (Verbosity, Vec<ConfigIssue>) {
        match self.verbosity.parse::<Verbosity>() {
            Ok(v) => (v, vec![]),
            Err(e) => (
                Verbosity::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "backend.verbosity".to_string(),
                        value: self.verbosity.clone(),
                        valid_values: Verbosity::ALL.iter().map(|v| v.to_string()).collect(),
                    },
                    format!("backend.verbosity: {}", e),
                )],
            ),
        }
    }

    /// Parse `backend.consensus`, dropping empty names and duplicates.
    pub fn parse_consensus(&self) -> (Vec<Backend>, Vec<ConfigIssue>) {
        let mut backends: Vec<Backend> = Vec::new();
        let mut issues = Vec::new();

        for (i, name) in self.consensus.iter().enumerate() {
            let field = format!("backend.consensus[{}]", i);
            match parse_backend(&field, name) {
                Ok(backend) if backends.contains(&backend) => {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::DuplicateBackend {
                            backend: backend.to_string(),
                        },
                        format!("{}: '{}' is listed twice, ignoring", field, backend),
                    ));
                }
                Ok(backend) => backends.push(backend),
                Err(issue) => issues.push(issue),
            }
        }

        (backends, issues)
    }

    pub fn validate_timeout(&self) -> Vec<ConfigIssue> {
        if self.timeout_seconds == 0 {
            vec![ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "backend.timeout_seconds: must be greater than 0",
            )]
        } else {
            vec![]
        }
    }
}

fn parse_backend(field: &str, name: &str) -> Result<Backend, ConfigIssue> {
    if name.trim().is_empty() {
        return Err(ConfigIssue::error(
            ConfigIssueCode::EmptyBackendName {
                field: field.to_string(),
            },
            format!("{}: backend name is empty", field),
        ));
    }
    // infallible: unknown names become custom backends
    let Ok(backend) = name.parse::<Backend>();
    Ok(backend)
}
