//! Orchestrator settings: defaults and consensus behavior.
//!
//! [`OrchestratorConfig`] is the explicit configuration struct handed to
//! [`ChatOrchestrator::new`](crate::use_cases::chat::ChatOrchestrator::new).
//! Infrastructure builds it from the config file; tests build it directly.

use quorum_desk_domain::{Backend, Verbosity};
use std::time::Duration;

/// Orchestrator construction parameters.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Fallback of the model selector for unknown task types.
    pub default_backend: Backend,
    /// Verbosity used when a chat does not specify one.
    pub default_verbosity: Verbosity,
    /// Emit a vote after each consensus answer (overridable per chat).
    pub voting_enabled: bool,
    /// Standalone consensus set, in emission order.
    pub consensus: Vec<Backend>,
    /// Upper bound for every single backend call.
    pub request_timeout: Duration,
    /// Issue standalone consensus calls concurrently (emission order is kept).
    pub parallel_consensus: bool,
    /// Buffered chunks per chat stream before the producer waits.
    pub stream_buffer: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_backend: Backend::default(),
            default_verbosity: Verbosity::default(),
            voting_enabled: true,
            consensus: Backend::default_consensus(),
            request_timeout: Duration::from_secs(60),
            parallel_consensus: false,
            stream_buffer: 16,
        }
    }
}

impl OrchestratorConfig {
    // ==================== Builder Methods ====================

    pub fn with_default_backend(mut self, backend: Backend) -> Self {
        self.default_backend = backend;
        self
    }

    pub fn with_default_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.default_verbosity = verbosity;
        self
    }

    pub fn with_voting(mut self, enabled: bool) -> Self {
        self.voting_enabled = enabled;
        self
    }

    pub fn with_consensus(mut self, backends: Vec<Backend>) -> Self {
        self.consensus = backends;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_parallel_consensus(mut self, parallel: bool) -> Self {
        self.parallel_consensus = parallel;
        self
    }

    pub fn with_stream_buffer(mut self, size: usize) -> Self {
        self.stream_buffer = size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.default_backend, Backend::Gpt5);
        assert_eq!(config.default_verbosity, Verbosity::Minimal);
        assert!(config.voting_enabled);
        assert_eq!(
            config.consensus,
            vec![Backend::Gpt5, Backend::Claude, Backend::Mistral]
        );
        assert!(!config.parallel_consensus);
    }

    #[test]
    fn test_builder() {
        let config = OrchestratorConfig::default()
            .with_default_backend(Backend::Claude)
            .with_voting(false)
            .with_request_timeout(Duration::from_secs(5))
            .with_stream_buffer(0);

        assert_eq!(config.default_backend, Backend::Claude);
        assert!(!config.voting_enabled);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.stream_buffer, 1);
    }
}
