//! Foreign chunk → canonical chunk mapping

use super::ForeignChunk;
use crate::chat::Chunk;
use crate::core::backend::Backend;
use serde_json::Value;

/// Map one engine chunk to exactly one canonical [`Chunk`].
///
/// Priority: content, then vote info, then the stringified record. Nothing
/// is ever dropped.
pub fn normalize(chunk: &dyn ForeignChunk) -> Chunk {
    if let Some(text) = chunk.content() {
        return Chunk::Content {
            model: chunk.model().map(|m| m.parse::<Backend>().unwrap_or_default()),
            phase: None,
            text,
        };
    }

    if let Some(vote) = chunk.vote_info() {
        let agent = vote
            .get("agent")
            .filter(|v| !v.is_null())
            .or_else(|| vote.get("name").filter(|v| !v.is_null()))
            .map(value_to_string);
        let reason = vote
            .get("reason")
            .filter(|v| !v.is_null())
            .map(value_to_string);
        return Chunk::VoteInfo {
            agent,
            score: coerce_score(vote.get("score")),
            reason,
        };
    }

    Chunk::Content {
        model: None,
        phase: None,
        text: chunk.describe(),
    }
}

/// Numeric score from a JSON value; 0.0 when absent or not a number.
///
/// Numeric strings (`"0.75"`) are accepted.
pub fn coerce_score(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        Some(Value::Bool(b)) => if *b { 1.0 } else { 0.0 },
        _ => 0.0,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
