use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mindwell_core::models::conversation::{AiRole, ChatRole};
use mindwell_core::models::emotion::{CrisisSnapshot, EmotionSnapshot};

use crate::error::LlmError;

/// A message in the transcript handed to the model. Unlike the persisted
/// [`mindwell_core::models::conversation::ChatMessage`] it carries no
/// timestamp; the provider only sees roles and text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: ChatRole,
    pub content: String,
}

impl PromptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// The three model capabilities the chat flow relies on.
///
/// Implementations may fail freely; the orchestrator owns the fallback
/// policy and never lets a failure reach the user.
#[async_trait]
pub trait SupportModel: Send + Sync {
    /// Classify the dominant emotion of one user message.
    async fn recognize_emotion(&self, text: &str) -> Result<EmotionSnapshot, LlmError>;

    /// Classify suicide/self-harm or other acute crisis risk.
    async fn detect_crisis(&self, text: &str) -> Result<CrisisSnapshot, LlmError>;

    /// Generate the companion's reply for the full transcript, in the voice
    /// of the selected persona, aware of the current emotion snapshot.
    async fn generate_reply(
        &self,
        messages: &[PromptMessage],
        role: AiRole,
        emotion: &EmotionSnapshot,
    ) -> Result<String, LlmError>;
}
