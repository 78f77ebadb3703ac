//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod consensus_engine;
pub mod model_client;
pub mod transcript_logger;
