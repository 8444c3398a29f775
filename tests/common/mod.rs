//! Shared helpers: in-process doubles for the store, notifier and provider,
//! plus request/response plumbing for driving the router with `oneshot`.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use futures::stream::{self, StreamExt};

use hone_studio::email_client::EmailError;
use hone_studio::gemini_client::GeminiError;
use hone_studio::knowledge_base::KnowledgeBase;
use hone_studio::models::chat::ChatTurn;
use hone_studio::models::contact::ContactSubmission;
use hone_studio::services::{ChatProvider, ContactNotifier, ContactStore, StoreError, TextStream};
use hone_studio::{app_router, AppState};

// =============================================================================
// Document store doubles
// =============================================================================

#[derive(Default)]
pub struct RecordingStore {
    pub records: Mutex<Vec<ContactSubmission>>,
}

impl RecordingStore {
    pub fn records(&self) -> Vec<ContactSubmission> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactStore for RecordingStore {
    async fn insert(&self, submission: &ContactSubmission) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

pub struct FailingStore;

#[async_trait]
impl ContactStore for FailingStore {
    async fn insert(&self, _submission: &ContactSubmission) -> Result<(), StoreError> {
        Err(StoreError::DatabaseError(sqlx::Error::PoolTimedOut))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::DatabaseError(sqlx::Error::PoolTimedOut))
    }
}

// =============================================================================
// Notifier double
// =============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { fail: true, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactNotifier for RecordingNotifier {
    async fn notify(&self, _submission: &ContactSubmission) -> Result<(), EmailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EmailError::Api { status: 503, body: "mail relay down".to_string() });
        }
        Ok(())
    }
}

// =============================================================================
// Chat provider double
// =============================================================================

/// Replays fixed increments. Can fail before streaming or after `fail_after`
/// increments, and records every conversation it was handed.
#[derive(Default)]
pub struct ScriptedProvider {
    pub chunks: Vec<String>,
    pub fail_setup: bool,
    pub fail_after: Option<usize>,
    pub calls: AtomicUsize,
    pub conversations: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedProvider {
    pub fn replying(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_conversation(&self) -> Vec<ChatTurn> {
        self.conversations.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn stream_reply(&self, turns: Vec<ChatTurn>) -> Result<TextStream, GeminiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.conversations.lock().unwrap().push(turns);

        if self.fail_setup {
            return Err(GeminiError::Api { status: 503, body: "unavailable".to_string() });
        }

        let mut items: Vec<Result<String, GeminiError>> = self.chunks.iter().cloned().map(Ok).collect();
        if let Some(n) = self.fail_after {
            items.truncate(n);
            items.push(Err(GeminiError::Stream { code: 500, message: "upstream reset".to_string() }));
            items.push(Ok("never delivered".to_string()));
        }
        Ok(stream::iter(items).boxed())
    }
}

// =============================================================================
// Router helpers
// =============================================================================

pub fn knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new("Hone Studio is a one-person fractional ops & tech studio.")
}

pub fn make_app(state: AppState) -> axum::Router {
    app_router(Arc::new(state))
}

pub fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}
