//! Verbosity level and the generation parameters it implies

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// How much the model should say (Value Object)
///
/// A closed set: unknown names are rejected by [`FromStr`](std::str::FromStr)
/// rather than coerced to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Short answers, low latency
    #[default]
    Minimal,
    /// Default reasoning depth
    Balanced,
    /// Step-by-step answers, large token budget
    Verbose,
}

/// Reasoning effort requested from reasoning-capable backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningEffort::Low => "low",
            ReasoningEffort::Medium => "medium",
            ReasoningEffort::High => "high",
        }
    }
}

/// Generation parameters derived from a [`Verbosity`] level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub reasoning_effort: ReasoningEffort,
}

impl Verbosity {
    /// All levels, from cheapest to most expensive
    pub const ALL: [Verbosity; 3] = [Verbosity::Minimal, Verbosity::Balanced, Verbosity::Verbose];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Minimal => "minimal",
            Verbosity::Balanced => "balanced",
            Verbosity::Verbose => "verbose",
        }
    }

    /// Token budget, sampling temperature and reasoning depth for this level
    pub fn params(&self) -> GenerationParams {
        match self {
            Verbosity::Minimal => GenerationParams {
                max_output_tokens: 512,
                temperature: 0.2,
                reasoning_effort: ReasoningEffort::Low,
            },
            Verbosity::Balanced => GenerationParams {
                max_output_tokens: 2048,
                temperature: 0.6,
                reasoning_effort: ReasoningEffort::Medium,
            },
            Verbosity::Verbose => GenerationParams {
                max_output_tokens: 4096,
                temperature: 0.6,
                reasoning_effort: ReasoningEffort::High,
            },
        }
    }

    /// Comma-separated list of accepted names, for error messages
    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verbosity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(Verbosity::Minimal),
            "balanced" => Ok(Verbosity::Balanced),
            "verbose" => Ok(Verbosity::Verbose),
            other => Err(DomainError::InvalidVerbosity(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_minimal() {
        assert_eq!(Verbosity::default(), Verbosity::Minimal);
    }

    #[test]
    fn test_parse_valid_levels() {
        for level in Verbosity::ALL {
            assert_eq!(level.as_str().parse::<Verbosity>().unwrap(), level);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        let err = "ultra".parse::<Verbosity>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidVerbosity(ref v) if v == "ultra"));
        assert!(err.to_string().contains("minimal, balanced, verbose"));
    }

    #[test]
    fn test_params_scale_with_level() {
        let minimal = Verbosity::Minimal.params();
        let verbose = Verbosity::Verbose.params();
        assert_eq!(minimal.max_output_tokens, 512);
        assert_eq!(minimal.reasoning_effort, ReasoningEffort::Low);
        assert!(verbose.max_output_tokens > Verbosity::Balanced.params().max_output_tokens);
        assert_eq!(verbose.reasoning_effort, ReasoningEffort::High);
    }
}
