//! Delegated consensus over HTTP
//!
//! POSTs `{query, verbosity, voting}` to an external multi-agent engine and
//! streams back its newline-delimited JSON records.

use super::ndjson::NdjsonDecoder;
use async_trait::async_trait;
use quorum_desk_application::{ConsensusEngine, EngineError, EngineItem, EngineRequest, EngineStream};
use quorum_desk_domain::ForeignChunk;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    query: &'a str,
    verbosity: &'static str,
    voting: bool,
    primary: &'a str,
}

pub struct HttpConsensusEngine {
    http: reqwest::Client,
    url: String,
}

impl HttpConsensusEngine {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ConsensusEngine for HttpConsensusEngine {
    fn name(&self) -> &str {
        "http-engine"
    }

    async fn open(&self, request: &EngineRequest) -> Result<EngineStream, EngineError> {
        let body = RunRequest {
            query: &request.query,
            verbosity: request.verbosity.as_str(),
            voting: request.voting_enabled,
            primary: request.primary.as_str(),
        };

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Unavailable(format!(
                "{} answered HTTP {}",
                self.url,
                status.as_u16()
            )));
        }

        debug!("Engine stream opened at {}", self.url);
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(pump(response, tx));
        Ok(EngineStream::new(rx))
    }
}

/// Forward decoded records until the body ends, fails, or the reader leaves.
async fn pump(mut response: reqwest::Response, tx: mpsc::Sender<EngineItem>) {
    let mut decoder = NdjsonDecoder::new();

    loop {
        let bytes = match response.chunk().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => break,
            Err(e) => {
                warn!("Engine stream broke: {}", e);
                let _ = tx.send(Err(EngineError::StreamFailed(e.to_string()))).await;
                return;
            }
        };

        for record in decoder.push(&bytes) {
            let item = match record {
                Ok(record) => Ok(Box::new(record) as Box<dyn ForeignChunk>),
                Err(e) => {
                    warn!("Engine stream broke: {}", e);
                    let _ = tx.send(Err(EngineError::StreamFailed(e.to_string()))).await;
                    return;
                }
            };
            if tx.send(item).await.is_err() {
                return;
            }
        }
    }

    if let Some(record) = decoder.finish() {
        let _ = tx.send(Ok(Box::new(record) as Box<dyn ForeignChunk>)).await;
    }
}
