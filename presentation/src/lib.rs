//! Presentation layer for quorum-desk
//!
//! This crate contains the CLI definition, the HTTP API and the chunk
//! formatters.

pub mod cli;
pub mod http;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{AskArgs, Cli, Command};
pub use http::{ApiError, ApiState, router, serve};
pub use output::{ChunkFormatter, ConsoleFormatter, JsonLinesFormatter, PlainFormatter};
