//! Chat stream value objects.

pub mod chunk;

pub use chunk::{Chunk, Phase};
