//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("verbosity must be one of [minimal, balanced, verbose], got '{0}'")]
    InvalidVerbosity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_verbosity_display() {
        let error = DomainError::InvalidVerbosity("ultra".to_string());
        assert_eq!(
            error.to_string(),
            "verbosity must be one of [minimal, balanced, verbose], got 'ultra'"
        );
    }
}
