//! Application-level configuration.
//!
//! - [`OrchestratorConfig`]: defaults, consensus set and call bounds for
//!   the chat orchestrator

pub mod orchestrator_config;

pub use orchestrator_config::OrchestratorConfig;
