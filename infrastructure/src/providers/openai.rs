//! OpenAI-compatible chat completions client
//!
//! Serves any backend exposed through a `/chat/completions` endpoint
//! (OpenAI, Mistral, Gemini's compatibility layer, local gateways).

use super::http::{LiveClientConfig, send_json};
use async_trait::async_trait;
use quorum_desk_application::ports::model_client::{BackendError, ModelClient};
use quorum_desk_domain::{Backend, Verbosity};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    config: LiveClientConfig,
}

impl OpenAiCompatibleClient {
    pub fn new(http: reqwest::Client, config: LiveClientConfig) -> Self {
        Self { http, config }
    }

    /// Reasoning models take `max_completion_tokens` + `reasoning_effort`
    /// and reject a custom temperature.
    fn is_reasoning_model(&self) -> bool {
        self.config.backend == Backend::Gpt5 || self.config.model.starts_with("gpt-5")
    }

    fn build_request<'a>(&'a self, prompt: &'a str, verbosity: Verbosity) -> ChatRequest<'a> {
        let params = verbosity.params();
        let budget = self.config.token_budget(params.max_output_tokens);
        let messages = vec![Message {
            role: "user",
            content: prompt,
        }];

        if self.is_reasoning_model() {
            ChatRequest {
                model: &self.config.model,
                messages,
                max_tokens: None,
                max_completion_tokens: Some(budget),
                temperature: None,
                reasoning_effort: Some(params.reasoning_effort.as_str()),
            }
        } else {
            ChatRequest {
                model: &self.config.model,
                messages,
                max_tokens: Some(budget),
                max_completion_tokens: None,
                temperature: Some(params.temperature),
                reasoning_effort: None,
            }
        }
    }
}

#[async_trait]
impl ModelClient for OpenAiCompatibleClient {
    fn backend(&self) -> &Backend {
        &self.config.backend
    }

    async fn generate(&self, prompt: &str, verbosity: Verbosity) -> Result<String, BackendError> {
        let body = self.build_request(prompt, verbosity);
        debug!(
            "POST {} model={} verbosity={}",
            self.config.endpoint("chat/completions"),
            self.config.model,
            verbosity
        );

        let request = self
            .http
            .post(self.config.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&body);
        let response: ChatResponse = send_json(&self.config.backend, request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                BackendError::malformed(self.config.backend.clone(), "response has no message content")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_desk_application::BackendErrorKind;

    fn client(backend: Backend, model: &str, max_tokens: Option<u32>) -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(
            reqwest::Client::new(),
            LiveClientConfig {
                backend,
                base_url: "http://127.0.0.1:1/v1/".to_string(),
                model: model.to_string(),
                api_key: "sk-test".to_string(),
                max_tokens,
            },
        )
    }

    #[test]
    fn test_reasoning_request_shape() {
        let client = client(Backend::Gpt5, "gpt-5", None);
        let body = serde_json::to_value(client.build_request("hi", Verbosity::Verbose)).unwrap();
        assert_eq!(body["model"], "gpt-5");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hi");
        assert_eq!(body["max_completion_tokens"], 4096);
        assert_eq!(body["reasoning_effort"], "high");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_chat_request_shape_with_cap() {
        let client = client(Backend::Mistral, "mistral-large-latest", Some(300));
        let body = serde_json::to_value(client.build_request("hi", Verbosity::Balanced)).unwrap();
        assert_eq!(body["max_tokens"], 300);
        assert!((body["temperature"].as_f64().unwrap() - 0.6).abs() < 1e-6);
        assert!(body.get("reasoning_effort").is_none());
    }

    #[test]
    fn test_parse_response() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"pong"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("pong"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = client(Backend::Mistral, "m", None);
        let err = client.generate("hi", Verbosity::Minimal).await.unwrap_err();
        assert_eq!(err.kind, BackendErrorKind::Transport);
        assert_eq!(err.backend, Backend::Mistral);
    }
}
