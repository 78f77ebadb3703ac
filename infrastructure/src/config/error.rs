//! Configuration errors

use quorum_desk_domain::ConfigIssue;
use thiserror::Error;

/// Fatal problems found while loading configuration or building clients
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),

    #[error("backend '{backend}' uses the {kind} provider but no API key was found (set {env})")]
    MissingApiKey {
        backend: String,
        kind: &'static str,
        env: String,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_desk_domain::ConfigIssueCode;

    #[test]
    fn test_invalid_lists_each_issue() {
        let err = ConfigError::Invalid(vec![
            ConfigIssue::error(ConfigIssueCode::ZeroTimeout, "backend.timeout_seconds: zero"),
            ConfigIssue::error(
                ConfigIssueCode::EmptyBackendName {
                    field: "backend.default".to_string(),
                },
                "backend.default: empty",
            ),
        ]);
        let message = err.to_string();
        assert!(message.contains("  - backend.timeout_seconds: zero"));
        assert!(message.contains("  - backend.default: empty"));
    }

    #[test]
    fn test_missing_key_names_env_var() {
        let err = ConfigError::MissingApiKey {
            backend: "claude".to_string(),
            kind: "anthropic",
            env: "ANTHROPIC_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("set ANTHROPIC_API_KEY"));
    }
}
