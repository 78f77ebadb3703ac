//! Anthropic messages API client

use super::http::{LiveClientConfig, send_json};
use async_trait::async_trait;
use quorum_desk_application::ports::model_client::{BackendError, ModelClient};
use quorum_desk_domain::{Backend, Verbosity};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct AnthropicClient {
    http: reqwest::Client,
    config: LiveClientConfig,
}

impl AnthropicClient {
    pub fn new(http: reqwest::Client, config: LiveClientConfig) -> Self {
        Self { http, config }
    }

    fn build_request<'a>(&'a self, prompt: &'a str, verbosity: Verbosity) -> MessagesRequest<'a> {
        let params = verbosity.params();
        MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.token_budget(params.max_output_tokens),
            temperature: params.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        }
    }
}

/// Concatenated text blocks; `None` when the reply has no text at all.
fn collect_text(response: MessagesResponse) -> Option<String> {
    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl ModelClient for AnthropicClient {
    fn backend(&self) -> &Backend {
        &self.config.backend
    }

    async fn generate(&self, prompt: &str, verbosity: Verbosity) -> Result<String, BackendError> {
        let body = self.build_request(prompt, verbosity);
        debug!(
            "POST {} model={} verbosity={}",
            self.config.endpoint("messages"),
            self.config.model,
            verbosity
        );

        let request = self
            .http
            .post(self.config.endpoint("messages"))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);
        let response: MessagesResponse = send_json(&self.config.backend, request).await?;

        collect_text(response).ok_or_else(|| {
            BackendError::malformed(self.config.backend.clone(), "response has no text content")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AnthropicClient {
        AnthropicClient::new(
            reqwest::Client::new(),
            LiveClientConfig {
                backend: Backend::Claude,
                base_url: "https://api.anthropic.com/v1".to_string(),
                model: "claude-sonnet-4-5".to_string(),
                api_key: "sk-ant".to_string(),
                max_tokens: None,
            },
        )
    }

    #[test]
    fn test_request_uses_verbosity_params() {
        let client = client();
        let body = serde_json::to_value(client.build_request("hi", Verbosity::Minimal)).unwrap();
        assert_eq!(body["model"], "claude-sonnet-4-5");
        assert_eq!(body["max_tokens"], 512);
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(body["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_collect_text_skips_other_blocks() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content":[
                {"type":"thinking","thinking":"..."},
                {"type":"text","text":"Hello"},
                {"type":"text","text":" there"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(collect_text(response).as_deref(), Some("Hello there"));
    }

    #[test]
    fn test_collect_text_empty() {
        let response: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(collect_text(response).is_none());
    }
}
