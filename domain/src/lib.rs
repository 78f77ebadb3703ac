//! Domain layer for quorum-desk
//!
//! This crate contains the core value objects and pure logic of the chat
//! orchestrator. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Primary / Consensus
//!
//! Every chat runs in two phases:
//!
//! - **Primary**: one low-latency answer from the backend chosen by
//!   [`ModelSelector`], always the first chunk of the stream
//! - **Consensus**: answers from every configured backend (or a delegated
//!   multi-agent engine), optionally paired with confidence votes
//!
//! ## Chunks
//!
//! The stream carries two kinds of [`Chunk`]: content and vote info.
//! Engine output of arbitrary shape is mapped onto them by [`normalize`].

pub mod chat;
pub mod config;
pub mod core;
pub mod engine;
pub mod routing;

// Re-export commonly used types
pub use chat::{Chunk, Phase};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    backend::Backend,
    error::DomainError,
    task_type::TaskType,
    verbosity::{GenerationParams, ReasoningEffort, Verbosity},
};
pub use engine::{ForeignChunk, coerce_score, normalize};
pub use routing::{ModelSelector, ROUTES};
