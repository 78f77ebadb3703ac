//! Builds the client set and the optional delegated engine from config

use super::anthropic::AnthropicClient;
use super::http::LiveClientConfig;
use super::openai::OpenAiCompatibleClient;
use super::stub::StubModelClient;
use crate::config::{
    ConfigError, FileConfig, FileProviderConfig, ProviderKind, default_base_url, default_model,
};
use crate::engine::HttpConsensusEngine;
use quorum_desk_application::{ConsensusEngine, ModelClient};
use quorum_desk_domain::Backend;
use std::sync::Arc;
use tracing::info;

/// One client per backend named in `config`, reading API keys from the
/// process environment.
pub fn build_clients(config: &FileConfig) -> Result<Vec<Arc<dyn ModelClient>>, ConfigError> {
    build_clients_with(config, |name| std::env::var(name).ok())
}

/// Same as [`build_clients`] with an explicit environment lookup.
///
/// A live provider without an API key is a fatal error.
pub fn build_clients_with(
    config: &FileConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Vec<Arc<dyn ModelClient>>, ConfigError> {
    let mut http: Option<reqwest::Client> = None;
    let mut clients: Vec<Arc<dyn ModelClient>> = Vec::new();

    for backend in config.backends() {
        let provider = config.provider(&backend);
        let (kind, _) = provider.parse_kind(backend.as_str());

        let client: Arc<dyn ModelClient> = match kind {
            ProviderKind::Stub => Arc::new(StubModelClient::new(backend)),
            ProviderKind::OpenAi => Arc::new(OpenAiCompatibleClient::new(
                cached_http_client(&mut http)?,
                live_config(&backend, &provider, kind, &lookup)?,
            )),
            ProviderKind::Anthropic => Arc::new(AnthropicClient::new(
                cached_http_client(&mut http)?,
                live_config(&backend, &provider, kind, &lookup)?,
            )),
        };
        clients.push(client);
    }

    Ok(clients)
}

fn live_config(
    backend: &Backend,
    provider: &FileProviderConfig,
    kind: ProviderKind,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<LiveClientConfig, ConfigError> {
    let api_key =
        provider
            .resolve_api_key(kind, lookup)
            .ok_or_else(|| ConfigError::MissingApiKey {
                backend: backend.to_string(),
                kind: kind.as_str(),
                env: provider
                    .key_env(kind)
                    .unwrap_or_else(|| "api_key".to_string()),
            })?;

    let live = LiveClientConfig {
        backend: backend.clone(),
        base_url: provider
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(kind, backend).to_string()),
        model: provider.model.clone().unwrap_or_else(|| default_model(backend)),
        api_key,
        max_tokens: provider.max_tokens,
    };
    info!(
        "Backend {} -> {} ({}, model {})",
        backend,
        kind.as_str(),
        live.base_url,
        live.model
    );
    Ok(live)
}

/// One connection pool shared by every live client.
fn cached_http_client(cache: &mut Option<reqwest::Client>) -> Result<reqwest::Client, ConfigError> {
    if let Some(client) = cache {
        return Ok(client.clone());
    }
    let client = shared_http_client()?;
    *cache = Some(client.clone());
    Ok(client)
}

/// Delegated engine when `[engine] url` is set.
pub fn build_engine(config: &FileConfig) -> Result<Option<Arc<dyn ConsensusEngine>>, ConfigError> {
    let Some(url) = config.engine.url() else {
        return Ok(None);
    };
    info!("Consensus delegated to {}", url);
    let engine = HttpConsensusEngine::new(shared_http_client()?, url);
    Ok(Some(Arc::new(engine)))
}

fn shared_http_client() -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .user_agent(concat!("quorum-desk/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Backends of `clients`, for logging
pub fn describe(clients: &[Arc<dyn ModelClient>]) -> Vec<Backend> {
    clients.iter().map(|c| c.backend().clone()).collect()
}
