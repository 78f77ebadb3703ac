//! Route handlers

use super::ApiState;
use super::error::ApiError;
use crate::output::{ChunkFormatter, PlainFormatter};
use axum::Json;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use futures::StreamExt;
use quorum_desk_application::ChatOptions;
use quorum_desk_domain::{Backend, TaskType, Verbosity};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::convert::Infallible;
use tracing::info;

/// Query string of `GET /chat/stream`
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub prompt: String,
    pub model: Option<String>,
    pub verbosity: Option<String>,
    pub task_type: Option<String>,
}

/// Body of `POST /chat/sync`
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub prompt: String,
    pub model: Option<String>,
    pub verbosity: Option<String>,
    pub task_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    pub prompt: String,
    pub model: String,
    pub verbosity: String,
    pub response: String,
}

/// Validate request parameters into chat options.
///
/// Blank `model` and `task_type` count as absent. `verbosity` is absent only
/// when the key is missing; any present value must name a level exactly.
fn chat_options(
    model: Option<&str>,
    verbosity: Option<&str>,
    task_type: Option<&str>,
) -> Result<ChatOptions, ApiError> {
    let mut options = ChatOptions::new();

    if let Some(model) = model.map(str::trim).filter(|m| !m.is_empty()) {
        let Ok(backend) = model.parse::<Backend>();
        options = options.with_backend(backend);
    }
    if let Some(verbosity) = verbosity {
        options = options.with_verbosity(verbosity.parse::<Verbosity>()?);
    }
    if let Some(task_type) = task_type.map(str::trim).filter(|t| !t.is_empty()) {
        options = options.with_task_type(TaskType::from(task_type));
    }

    Ok(options)
}

/// `GET /chat/stream`: chunked plain-text stream of one chat
pub async fn chat_stream(
    State(state): State<ApiState>,
    Query(query): Query<StreamQuery>,
) -> Result<Response, ApiError> {
    let options = chat_options(
        query.model.as_deref(),
        query.verbosity.as_deref(),
        query.task_type.as_deref(),
    )?;
    info!(
        "GET /chat/stream task_type={} model={:?}",
        options.task_type, options.backend_hint
    );

    let body = state
        .orchestrator
        .chat(query.prompt, options)
        .map(|chunk| Ok::<_, Infallible>(PlainFormatter.format_chunk(&chunk)));

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(body),
    )
        .into_response())
}

/// `POST /chat/sync`: whole answer as JSON
pub async fn chat_sync(
    State(state): State<ApiState>,
    Json(request): Json<SyncRequest>,
) -> Result<Json<SyncResponse>, ApiError> {
    let options = chat_options(
        request.model.as_deref(),
        request.verbosity.as_deref(),
        request.task_type.as_deref(),
    )?;
    let model = state.orchestrator.resolve_backend(&options);
    let verbosity = state.orchestrator.effective_verbosity(&options);
    info!("POST /chat/sync model={} verbosity={}", model, verbosity);

    let response = state
        .orchestrator
        .chat_sync(request.prompt.clone(), options)
        .await;

    Ok(Json(SyncResponse {
        prompt: request.prompt,
        model: model.to_string(),
        verbosity: verbosity.to_string(),
        response,
    }))
}

/// `GET /health`
pub async fn health(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.service,
        "server_time": Utc::now().timestamp(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_model_and_task_type_are_ignored() {
        let options = chat_options(Some(" "), None, Some("")).unwrap();
        assert!(options.backend_hint.is_none());
        assert!(options.verbosity.is_none());
        assert_eq!(options.task_type.as_str(), TaskType::DEFAULT);
    }

    #[test]
    fn test_blank_or_padded_verbosity_is_rejected() {
        for raw in ["", " ", " minimal ", "Minimal"] {
            let err = chat_options(None, Some(raw), None).unwrap_err();
            assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST, "{raw:?}");
        }
    }

    #[test]
    fn test_model_hint_is_case_insensitive() {
        let options = chat_options(Some("GPT5"), Some("verbose"), Some("summarization")).unwrap();
        assert_eq!(options.backend_hint, Some(Backend::Gpt5));
        assert_eq!(options.verbosity, Some(Verbosity::Verbose));
        assert_eq!(options.task_type.as_str(), "summarization");
    }

    #[test]
    fn test_unknown_verbosity_is_rejected() {
        let err = chat_options(None, Some("ultra"), None).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("ultra"));
    }
}
