use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown ai role: {0}")]
    UnknownAiRole(String),

    #[error("unknown mood: {0}")]
    UnknownMood(String),

    #[error("unknown chat role: {0}")]
    UnknownChatRole(String),

    #[error("unknown assessment kind: {0}")]
    UnknownAssessmentKind(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
