// lib.rs - HTTP backend for the Hone Studio site: contact intake and the chat relay
pub mod config;
pub mod db;
pub mod email_client;
pub mod error;
pub mod gemini_client;
pub mod handlers;
pub mod knowledge_base;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{Extension, Router};
use knowledge_base::KnowledgeBase;
use services::{ChatProvider, ContactNotifier, ContactStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

// Collaborators are optional; a missing one fails only the route that needs it
pub struct AppState {
    pub contact_store: Option<Arc<dyn ContactStore>>,
    pub notifier: Option<Arc<dyn ContactNotifier>>,
    pub chat_provider: Option<Arc<dyn ChatProvider>>,
    pub knowledge_base: KnowledgeBase,
}

impl AppState {
    pub fn new(knowledge_base: KnowledgeBase) -> Self {
        Self {
            contact_store: None,
            notifier: None,
            chat_provider: None,
            knowledge_base,
        }
    }

    pub fn with_contact_store(mut self, store: Arc<dyn ContactStore>) -> Self {
        self.contact_store = Some(store);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ContactNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_chat_provider(mut self, provider: Arc<dyn ChatProvider>) -> Self {
        self.chat_provider = Some(provider);
        self
    }
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::contact::contact_routes())
        .merge(handlers::chat::chat_routes())
        .merge(handlers::status::status_routes())
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
