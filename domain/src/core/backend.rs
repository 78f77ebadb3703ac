//! Backend value object identifying a configured model provider

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Symbolic name of a model backend (Value Object)
///
/// Used as the key for configured model clients and as the `model`
/// field of content chunks. Within one orchestrator a name always refers
/// to a single underlying service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Backend {
    /// GPT-5 family (low-latency structured output)
    Gpt5,
    /// Claude family (summarization, support dialogue)
    Claude,
    /// Mistral family (research and retrieval-heavy prompts)
    Mistral,
    /// Gemini family
    Gemini,
    /// Any other configured backend
    Custom(String),
}

impl Backend {
    /// Get the string identifier for this backend
    pub fn as_str(&self) -> &str {
        match self {
            Backend::Gpt5 => "gpt5",
            Backend::Claude => "claude",
            Backend::Mistral => "mistral",
            Backend::Gemini => "gemini",
            Backend::Custom(s) => s,
        }
    }

    /// Default consensus set, in emission order
    pub fn default_consensus() -> Vec<Backend> {
        vec![Backend::Gpt5, Backend::Claude, Backend::Mistral]
    }
}

impl Default for Backend {
    /// Returns the default backend (GPT-5)
    fn default() -> Self {
        Backend::Gpt5
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(match normalized.as_str() {
            "gpt5" | "gpt-5" => Backend::Gpt5,
            "claude" => Backend::Claude,
            "mistral" => Backend::Mistral,
            "gemini" => Backend::Gemini,
            _ => Backend::Custom(normalized),
        })
    }
}

impl Serialize for Backend {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Backend {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // FromStr is infallible; unknown names become Custom(...)
        Ok(s.parse().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_backends_parse() {
        for backend in [Backend::Gpt5, Backend::Claude, Backend::Mistral, Backend::Gemini] {
            let parsed: Backend = backend.to_string().parse().unwrap();
            assert_eq!(parsed, backend);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let backend: Backend = "Claude".parse().unwrap();
        assert_eq!(backend, Backend::Claude);
        let backend: Backend = " GPT-5 ".parse().unwrap();
        assert_eq!(backend, Backend::Gpt5);
    }

    #[test]
    fn test_custom_backend() {
        let backend: Backend = "llama-local".parse().unwrap();
        assert_eq!(backend, Backend::Custom("llama-local".to_string()));
        assert_eq!(backend.as_str(), "llama-local");
    }

    #[test]
    fn test_serde_uses_symbolic_name() {
        let json = serde_json::to_string(&Backend::Mistral).unwrap();
        assert_eq!(json, "\"mistral\"");
        let back: Backend = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(back, Backend::Gemini);
    }
}
