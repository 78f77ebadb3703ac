//! Model client adapters
//!
//! - [`StubModelClient`]: deterministic offline answers
//! - [`OpenAiCompatibleClient`]: `/chat/completions` endpoints
//! - [`AnthropicClient`]: Anthropic messages API
//!
//! [`factory`] turns the `[providers]` config into a client set.

mod anthropic;
pub mod factory;
mod http;
mod openai;
mod stub;

pub use anthropic::AnthropicClient;
pub use factory::{build_clients, build_clients_with, build_engine, describe};
pub use http::LiveClientConfig;
pub use openai::OpenAiCompatibleClient;
pub use stub::{STUB_PROMPT_CHARS, StubModelClient};
