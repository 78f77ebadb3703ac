//! Infrastructure layer for quorum-desk
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: model clients, the delegated consensus engine, the
//! transcript logger, and configuration file loading.

pub mod config;
pub mod engine;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use engine::HttpConsensusEngine;
pub use logging::JsonlTranscriptLogger;
pub use providers::{
    AnthropicClient, OpenAiCompatibleClient, StubModelClient, build_clients, build_engine,
    describe,
};
