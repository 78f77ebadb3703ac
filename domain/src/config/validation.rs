//! Structured configuration issues.
//!
//! Config loaders report problems as [`ConfigIssue`]s rather than failing
//! on the first one, so every problem in a file can be shown at once.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A backend name is empty or whitespace.
    EmptyBackendName { field: String },
    /// A value is not one of the accepted variants.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A timeout of zero would fail every call.
    ZeroTimeout,
    /// The same backend is listed twice in the consensus set.
    DuplicateBackend { backend: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let err = ConfigIssue::error(ConfigIssueCode::ZeroTimeout, "timeout is 0");
        assert!(err.is_error());
        let warn = ConfigIssue::warning(
            ConfigIssueCode::DuplicateBackend {
                backend: "claude".to_string(),
            },
            "duplicate",
        );
        assert!(!warn.is_error());
        assert_eq!(warn.severity, Severity::Warning);
    }
}
