//! Port for structured chat transcripts.
//!
//! Defines the [`TranscriptLogger`] trait for recording every chunk a chat
//! emits to a machine-readable log (JSONL).
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! stream a caller received.

use serde_json::Value;

/// A structured transcript event.
///
/// Each event has a type string, the chat it belongs to, and a JSON
/// payload containing event-specific fields.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "chat_started", "chunk", "chat_finished").
    pub event_type: &'static str,
    /// Per-call identifier, unique within one orchestrator instance.
    pub chat_id: u64,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, chat_id: u64, payload: Value) -> Self {
        Self {
            event_type,
            chat_id,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// The `log` method is synchronous and non-fallible: logging failures must
/// never disturb a chat stream.
pub trait TranscriptLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
