//! Chunks emitted by the chat orchestrator.
//!
//! A chat stream is an ordered sequence of [`Chunk`]s: the first one is
//! always the primary answer, followed by zero or more consensus entries
//! and their confidence votes.

use crate::core::backend::Backend;
use serde::{Deserialize, Serialize};

/// Which step of the chat flow produced a content chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The single low-latency answer that opens every stream.
    Primary,
    /// One answer per configured backend in standalone mode.
    Consensus,
    /// A direct call through the primary backend after the consensus
    /// phase failed.
    Fallback,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Primary => "primary",
            Phase::Consensus => "consensus",
            Phase::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of a chat stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chunk {
    /// Generated text.
    Content {
        model: Option<Backend>,
        phase: Option<Phase>,
        #[serde(rename = "content")]
        text: String,
    },
    /// Confidence metadata for a backend's answer.
    VoteInfo {
        agent: Option<String>,
        score: f64,
        reason: Option<String>,
    },
}

impl Chunk {
    /// Content chunk tagged with a backend and phase.
    pub fn content(model: Backend, phase: Phase, text: impl Into<String>) -> Self {
        Chunk::Content {
            model: Some(model),
            phase: Some(phase),
            text: text.into(),
        }
    }

    /// Vote for a backend's answer.
    pub fn vote(agent: &Backend, score: f64) -> Self {
        Chunk::VoteInfo {
            agent: Some(agent.to_string()),
            score,
            reason: None,
        }
    }

    /// Returns the text if this is a content chunk.
    pub fn text(&self) -> Option<&str> {
        match self {
            Chunk::Content { text, .. } => Some(text),
            Chunk::VoteInfo { .. } => None,
        }
    }

    /// Returns the phase of a content chunk.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Chunk::Content { phase, .. } => *phase,
            Chunk::VoteInfo { .. } => None,
        }
    }

    /// Backend or agent name this chunk is attributed to.
    pub fn source(&self) -> Option<&str> {
        match self {
            Chunk::Content { model, .. } => model.as_ref().map(|m| m.as_str()),
            Chunk::VoteInfo { agent, .. } => agent.as_deref(),
        }
    }

    pub fn is_vote(&self) -> bool {
        matches!(self, Chunk::VoteInfo { .. })
    }

    /// Wire name of the variant (`content` / `vote_info`).
    pub fn kind(&self) -> &'static str {
        match self {
            Chunk::Content { .. } => "content",
            Chunk::VoteInfo { .. } => "vote_info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_accessors() {
        let chunk = Chunk::content(Backend::Claude, Phase::Primary, "hello");
        assert_eq!(chunk.text(), Some("hello"));
        assert_eq!(chunk.phase(), Some(Phase::Primary));
        assert_eq!(chunk.source(), Some("claude"));
        assert!(!chunk.is_vote());
    }

    #[test]
    fn test_vote_accessors() {
        let chunk = Chunk::vote(&Backend::Mistral, 1.0);
        assert_eq!(chunk.text(), None);
        assert_eq!(chunk.phase(), None);
        assert_eq!(chunk.source(), Some("mistral"));
        assert_eq!(chunk.kind(), "vote_info");
    }

    #[test]
    fn test_serialize_content_shape() {
        let chunk = Chunk::content(Backend::Gpt5, Phase::Primary, "hi");
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["type"], "content");
        assert_eq!(json["model"], "gpt5");
        assert_eq!(json["phase"], "primary");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn test_serialize_vote_shape() {
        let json = serde_json::to_value(Chunk::vote(&Backend::Claude, 0.5)).unwrap();
        assert_eq!(json["type"], "vote_info");
        assert_eq!(json["agent"], "claude");
        assert_eq!(json["score"], 0.5);
        assert!(json["reason"].is_null());
    }
}
