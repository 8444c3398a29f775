// src/knowledge_base.rs
use crate::config::ConfigError;
use crate::models::chat::{ChatRole, ChatTurn};
use std::path::Path;

const SYSTEM_PROMPT: &str = include_str!("../content/system_prompt.txt");
const BUNDLED_KNOWLEDGE: &str = include_str!("../content/knowledge_base.txt");

pub const ACKNOWLEDGEMENT: &str =
    "Understood. I'm Honest AI, ready to help visitors learn about Hone Studio.";

/// The fixed system prompt the relay sends on every call: instructions followed
/// by the whole knowledge base. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    prompt: String,
}

impl KnowledgeBase {
    pub fn new(knowledge: &str) -> Self {
        let prompt = format!(
            "{}\n=== KNOWLEDGE BASE ===\n{}",
            SYSTEM_PROMPT.trim_end(),
            knowledge.trim()
        );
        Self { prompt }
    }

    pub fn bundled() -> Self {
        Self::new(BUNDLED_KNOWLEDGE)
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::KnowledgeBase {
                    path: path.to_path_buf(),
                    source,
                })?;
                tracing::info!("Loaded knowledge base from {} ({} chars)", path.display(), text.len());
                Ok(Self::new(&text))
            }
            None => Ok(Self::bundled()),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The system turn text, with a note naming the visitor's current page
    /// when one is known.
    pub fn system_instruction(&self, page: Option<&str>) -> String {
        match page.filter(|p| !p.is_empty()) {
            Some(page) => format!("{}\nThe user is currently on the {} page.", self.prompt, page),
            None => self.prompt.clone(),
        }
    }

    /// Rebuilds the full provider conversation for one relay call: system turn,
    /// acknowledgement, prior turns in order, then the new message.
    pub fn compose_conversation(
        &self,
        page: Option<&str>,
        history: Vec<ChatTurn>,
        message: &str,
    ) -> Vec<ChatTurn> {
        let mut turns = Vec::with_capacity(history.len() + 3);
        turns.push(ChatTurn::new(ChatRole::System, self.system_instruction(page)));
        turns.push(ChatTurn::new(ChatRole::Assistant, ACKNOWLEDGEMENT));
        turns.extend(history);
        turns.push(ChatTurn::new(ChatRole::User, message));
        turns
    }
}
