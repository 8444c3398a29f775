// Generative-AI provider seam used by the chat relay

use crate::gemini_client::GeminiError;
use crate::models::chat::ChatTurn;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Text increments in the order the provider produced them.
pub type TextStream = BoxStream<'static, Result<String, GeminiError>>;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Starts one streamed reply for a fully composed conversation. `Err` means
    /// the call failed before any text was produced.
    async fn stream_reply(&self, turns: Vec<ChatTurn>) -> Result<TextStream, GeminiError>;
}
