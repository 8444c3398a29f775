// src/handlers/chat.rs
use crate::error::{parse_json, ApiError};
use crate::models::chat::ChatRequest;
use crate::services::chat_provider::TextStream;
use crate::AppState;
use axum::{
    body::{Body, Bytes},
    extract::Extension,
    http::{header, StatusCode},
    response::Response,
    routing::post,
    Router,
};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const CHAT_FAILED: &str = "Something went wrong. Please try again.";

pub fn chat_routes() -> Router {
    Router::new().route("/api/chat", post(relay_chat))
}

/// Streams a knowledge-base grounded reply as raw, unframed text.
async fn relay_chat(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: ChatRequest = parse_json(&body)?;

    // Blank messages are refused, but the provider gets the text as typed.
    let message = request.message.as_deref().unwrap_or_default();
    if message.trim().is_empty() {
        return Err(ApiError::BadRequest(MESSAGE_REQUIRED));
    }

    let Some(provider) = state.chat_provider.as_ref() else {
        tracing::error!("Chat API error: chat provider is not configured");
        return Err(ApiError::Internal(CHAT_FAILED));
    };

    let history = request.history.unwrap_or_default();
    tracing::info!(
        page = request.page.as_deref().unwrap_or("unknown"),
        history_turns = history.len(),
        "💬 Relaying chat message"
    );

    let turns = state
        .knowledge_base
        .compose_conversation(request.page.as_deref(), history, message);

    let increments = provider.stream_reply(turns).await.map_err(|e| {
        tracing::error!("Chat API error: {}", e);
        ApiError::Internal(CHAT_FAILED)
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(relay_body(increments)))
        .map_err(|e| {
            tracing::error!("Failed to build chat response: {}", e);
            ApiError::Internal(CHAT_FAILED)
        })
}

/// Forwards increments in provider order. A provider error ends the body
/// early with no marker, so the client just sees the text stop.
pub fn relay_body(increments: TextStream) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    increments
        .take_while(|item| {
            let keep = match item {
                Ok(_) => true,
                Err(e) => {
                    tracing::error!("Gemini stream error: {}", e);
                    false
                }
            };
            futures::future::ready(keep)
        })
        .filter_map(|item| futures::future::ready(item.ok().filter(|text| !text.is_empty())))
        .map(|text| Ok(Bytes::from(text)))
}
