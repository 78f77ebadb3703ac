//! Model client port
//!
//! Defines the interface for generating text with one backend.

use async_trait::async_trait;
use quorum_desk_domain::{Backend, Verbosity};
use thiserror::Error;

/// Why a backend call failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Upstream answered with a non-success HTTP status
    Http(u16),
    /// Network / connection failure
    Transport,
    /// The call exceeded the configured timeout
    Timeout,
    /// The response could not be interpreted
    MalformedResponse,
    /// No API key available for a live backend
    MissingCredentials,
    /// The requested backend has no configured client
    NotConfigured,
}

impl std::fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendErrorKind::Http(status) => write!(f, "HTTP {}", status),
            BackendErrorKind::Transport => f.write_str("transport error"),
            BackendErrorKind::Timeout => f.write_str("timeout"),
            BackendErrorKind::MalformedResponse => f.write_str("malformed response"),
            BackendErrorKind::MissingCredentials => f.write_str("missing credentials"),
            BackendErrorKind::NotConfigured => f.write_str("not configured"),
        }
    }
}

/// Upstream model-provider failure
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{backend} {kind}: {message}")]
pub struct BackendError {
    pub backend: Backend,
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(backend: Backend, kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            backend,
            kind,
            message: message.into(),
        }
    }

    pub fn http(backend: Backend, status: u16, message: impl Into<String>) -> Self {
        Self::new(backend, BackendErrorKind::Http(status), message)
    }

    pub fn transport(backend: Backend, message: impl Into<String>) -> Self {
        Self::new(backend, BackendErrorKind::Transport, message)
    }

    pub fn timeout(backend: Backend, after: std::time::Duration) -> Self {
        Self::new(
            backend,
            BackendErrorKind::Timeout,
            format!("no response after {}ms", after.as_millis()),
        )
    }

    pub fn malformed(backend: Backend, message: impl Into<String>) -> Self {
        Self::new(backend, BackendErrorKind::MalformedResponse, message)
    }

    pub fn not_configured(backend: Backend) -> Self {
        let message = format!("no client configured for backend '{}'", backend);
        Self::new(backend, BackendErrorKind::NotConfigured, message)
    }
}

/// Text generation with a single backend
///
/// Implementations (stub and live adapters) live in the infrastructure
/// layer. Stub implementations never fail.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// The backend this client talks to
    fn backend(&self) -> &Backend;

    /// Generate a completion for `prompt` at the given verbosity
    async fn generate(&self, prompt: &str, verbosity: Verbosity) -> Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_display_includes_backend_and_kind() {
        let err = BackendError::http(Backend::Claude, 429, "rate limited");
        assert_eq!(err.to_string(), "claude HTTP 429: rate limited");
    }

    #[test]
    fn test_timeout_error() {
        let err = BackendError::timeout(Backend::Gpt5, Duration::from_millis(1500));
        assert_eq!(err.kind, BackendErrorKind::Timeout);
        assert_eq!(err.to_string(), "gpt5 timeout: no response after 1500ms");
    }

    #[test]
    fn test_not_configured_message() {
        let err = BackendError::not_configured(Backend::Gemini);
        assert_eq!(err.kind, BackendErrorKind::NotConfigured);
        assert!(err.message.contains("gemini"));
    }
}
