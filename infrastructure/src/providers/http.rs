//! Shared plumbing for the live HTTP clients

use quorum_desk_application::ports::model_client::BackendError;
use quorum_desk_domain::Backend;
use quorum_desk_domain::core::string::truncate;
use serde::de::DeserializeOwned;

/// Longest upstream error body kept in a [`BackendError`] message
const ERROR_BODY_LIMIT: usize = 300;

/// Settings shared by every live client
#[derive(Debug, Clone)]
pub struct LiveClientConfig {
    pub backend: Backend,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    /// Upper bound applied on top of the verbosity token budget
    pub max_tokens: Option<u32>,
}

impl LiveClientConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn token_budget(&self, verbosity_budget: u32) -> u32 {
        self.max_tokens
            .map_or(verbosity_budget, |cap| cap.min(verbosity_budget))
    }
}

/// Send a request and decode a successful JSON body.
pub async fn send_json<T: DeserializeOwned>(
    backend: &Backend,
    request: reqwest::RequestBuilder,
) -> Result<T, BackendError> {
    let response = request
        .send()
        .await
        .map_err(|e| BackendError::transport(backend.clone(), e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::http(
            backend.clone(),
            status.as_u16(),
            truncate(body.trim(), ERROR_BODY_LIMIT),
        ));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| BackendError::malformed(backend.clone(), e.to_string()))
}
