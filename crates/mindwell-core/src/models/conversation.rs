use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::emotion::EmotionSnapshot;

/// A persisted chat thread between a user and the AI companion.
///
/// The message sequence is append-only and chronologically ordered; a user's
/// "current" conversation is the most recently created row for that user.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ai_role: AiRole,
    pub messages: Vec<ChatMessage>,
    pub emotion_data: Option<EmotionSnapshot>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: jiff::Timestamp,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl std::str::FromStr for ChatRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            other => Err(CoreError::UnknownChatRole(other.to_string())),
        }
    }
}

/// The AI companion persona selected for a conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AiRole {
    #[default]
    Gentle,
    Rational,
    Energetic,
}

impl AiRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiRole::Gentle => "gentle",
            AiRole::Rational => "rational",
            AiRole::Energetic => "energetic",
        }
    }

    /// Display name shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            AiRole::Gentle => "温暖陪伴者",
            AiRole::Rational => "理性分析师",
            AiRole::Energetic => "活力鼓励师",
        }
    }
}

impl std::str::FromStr for AiRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gentle" => Ok(AiRole::Gentle),
            "rational" => Ok(AiRole::Rational),
            "energetic" => Ok(AiRole::Energetic),
            other => Err(CoreError::UnknownAiRole(other.to_string())),
        }
    }
}
