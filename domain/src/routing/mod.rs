//! Task-type based backend routing.

mod selector;

pub use selector::{ModelSelector, ROUTES};
