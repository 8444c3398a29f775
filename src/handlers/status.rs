// src/handlers/status.rs
use crate::AppState;
use axum::{
    extract::Extension,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn status_routes() -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/status", get(api_status))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn configured(present: bool) -> &'static str {
    if present { "configured" } else { "not_configured" }
}

async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let store_status = match state.contact_store.as_ref() {
        Some(store) => match store.health_check().await {
            Ok(()) => "healthy",
            Err(e) => {
                tracing::warn!("Document store health check failed: {}", e);
                "unhealthy"
            }
        },
        None => "not_configured",
    };

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "document_store": store_status,
            "chat_provider": configured(state.chat_provider.is_some()),
            "email_notifications": configured(state.notifier.is_some())
        },
        "endpoints": {
            "contact": "/api/contact",
            "chat": "/api/chat",
            "health": "/api/health",
            "status": "/api/status"
        }
    }))
}
