//! Delegated consensus engine adapters

mod http_engine;
mod ndjson;

pub use http_engine::HttpConsensusEngine;
pub use ndjson::NdjsonDecoder;
