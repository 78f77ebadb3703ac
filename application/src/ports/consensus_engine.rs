//! Delegated consensus engine port
//!
//! A multi-agent engine that runs the consensus phase on its own and
//! streams back chunks of arbitrary shape.

use async_trait::async_trait;
use quorum_desk_domain::{Backend, ForeignChunk, Verbosity};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors raised by a delegated engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The engine could not be reached or refused the request
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    /// The engine failed after streaming had started
    #[error("Engine stream failed: {0}")]
    StreamFailed(String),
}

/// What the orchestrator asks the engine to do
#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub query: String,
    pub verbosity: Verbosity,
    pub voting_enabled: bool,
    /// Backend resolved for the primary phase
    pub primary: Backend,
}

/// One item of an engine stream
pub type EngineItem = Result<Box<dyn ForeignChunk>, EngineError>;

/// Handle for receiving an engine's chunks.
///
/// Wraps an `mpsc::Receiver<EngineItem>`; the stream ends when the
/// sender side is dropped.
pub struct EngineStream {
    receiver: mpsc::Receiver<EngineItem>,
}

impl EngineStream {
    pub fn new(receiver: mpsc::Receiver<EngineItem>) -> Self {
        Self { receiver }
    }

    /// Build a stream from already-known items
    pub fn from_items(items: Vec<EngineItem>) -> Self {
        let (tx, rx) = mpsc::channel(items.len().max(1));
        for item in items {
            // capacity covers every item
            let _ = tx.try_send(item);
        }
        Self::new(rx)
    }

    /// Next item, or `None` once the engine is done
    pub async fn next(&mut self) -> Option<EngineItem> {
        self.receiver.recv().await
    }
}

/// Multi-agent engine the consensus phase can be delegated to
#[async_trait]
pub trait ConsensusEngine: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Start a consensus run and return its chunk stream
    async fn open(&self, request: &EngineRequest) -> Result<EngineStream, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_from_items_preserves_order() {
        let mut stream = EngineStream::from_items(vec![
            Ok(Box::new(json!({"content": "a"})) as Box<dyn ForeignChunk>),
            Err(EngineError::StreamFailed("boom".to_string())),
        ]);

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.content(), Some("a".to_string()));
        assert!(matches!(
            stream.next().await,
            Some(Err(EngineError::StreamFailed(_)))
        ));
        assert!(stream.next().await.is_none());
    }
}
