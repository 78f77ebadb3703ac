//! Application layer for quorum-desk
//!
//! This crate contains the chat use case, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestratorConfig;
pub use ports::{
    consensus_engine::{ConsensusEngine, EngineError, EngineItem, EngineRequest, EngineStream},
    model_client::{BackendError, BackendErrorKind, ModelClient},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::chat::{
    CONSENSUS_VOTE_SCORE, ChatOptions, ChatOrchestrator, ChunkStream, EngineMode,
    OrchestratorError, PRIMARY_FALLBACK_PREFIX,
};
