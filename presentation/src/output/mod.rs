//! Chunk rendering for terminals and HTTP bodies

pub mod console;
pub mod formatter;

pub use console::ConsoleFormatter;
pub use formatter::{ChunkFormatter, JsonLinesFormatter, PlainFormatter};
