//! Chunks produced by a delegated multi-agent engine.
//!
//! Engines emit loosely shaped records. [`ForeignChunk`] describes what we
//! can ask of such a record, and [`normalize`] is the single place that
//! turns one into a canonical [`Chunk`](crate::chat::Chunk).

mod normalize;

pub use normalize::{coerce_score, normalize};

use serde_json::Value;

/// Capability view over an upstream engine chunk of unknown shape.
pub trait ForeignChunk: Send {
    /// Text payload, if the chunk carries one.
    fn content(&self) -> Option<String>;

    /// Vote metadata object, if the chunk carries one.
    fn vote_info(&self) -> Option<Value>;

    /// Model or agent that produced the chunk, if stated.
    fn model(&self) -> Option<String>;

    /// Lossless textual rendering used when nothing else matches.
    fn describe(&self) -> String;
}

/// JSON records as emitted by HTTP/NDJSON engines.
///
/// Recognized keys: `content` (or `text`) for content, `vote_info` for
/// votes, `model` (or `agent`) for attribution. A bare JSON string is
/// treated as content.
impl ForeignChunk for Value {
    fn content(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map
                .get("content")
                .or_else(|| map.get("text"))
                .and_then(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                }),
            _ => None,
        }
    }

    fn vote_info(&self) -> Option<Value> {
        self.get("vote_info").filter(|v| !v.is_null()).cloned()
    }

    fn model(&self) -> Option<String> {
        self.get("model")
            .or_else(|| self.get("agent"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}
