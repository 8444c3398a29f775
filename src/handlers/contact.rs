// src/handlers/contact.rs
use crate::error::{parse_json, ApiError};
use crate::models::contact::ContactPayload;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::Extension,
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub const SUBMIT_FAILED: &str = "Failed to submit your message. Please try again later.";

pub fn contact_routes() -> Router {
    Router::new().route("/api/contact", post(submit_contact))
}

/// Validates and stores one contact form. The store write decides the outcome;
/// the email notification that follows is advisory.
async fn submit_contact(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload: ContactPayload = parse_json(&body)?;
    let submission = payload.validate().map_err(ApiError::Validation)?.into_submission();

    let Some(store) = state.contact_store.as_ref() else {
        tracing::error!("Contact submission rejected: document store is not configured");
        return Err(ApiError::Internal(SUBMIT_FAILED));
    };

    if let Err(e) = store.insert(&submission).await {
        tracing::error!(submission_id = %submission.id, "Failed to store contact submission: {}", e);
        return Err(ApiError::Internal(SUBMIT_FAILED));
    }

    match state.notifier.as_ref() {
        Some(notifier) => {
            if let Err(e) = notifier.notify(&submission).await {
                tracing::warn!(submission_id = %submission.id, "Contact notification failed: {}", e);
            }
        }
        None => {
            tracing::warn!("Email credentials not configured; skipping contact notification");
        }
    }

    Ok(Json(json!({ "success": true })))
}
