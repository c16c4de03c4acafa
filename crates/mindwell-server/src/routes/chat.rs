use std::str::FromStr;

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use mindwell_core::models::conversation::{AiRole, ChatMessage, ChatRole};
use mindwell_core::models::emotion::{CrisisSnapshot, EmotionSnapshot};
use mindwell_llm::provider::PromptMessage;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Persona id; validated against the closed set, defaults to gentle.
    pub ai_role: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

/// A prior turn as sent by the client.
#[derive(Deserialize)]
pub struct HistoryItem {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub emotion_data: EmotionSnapshot,
    pub crisis_data: CrisisSnapshot,
    pub is_crisis_response: bool,
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("消息不能为空".to_string()));
    }

    let ai_role = match body.ai_role.as_deref() {
        None | Some("") => AiRole::default(),
        Some(raw) => AiRole::from_str(raw)
            .map_err(|_| ApiError::BadRequest("无效的AI角色".to_string()))?,
    };

    let history = body
        .history
        .iter()
        .map(|item| {
            let role = ChatRole::from_str(&item.role)
                .map_err(|_| ApiError::BadRequest("无效的对话历史".to_string()))?;
            Ok(PromptMessage {
                role,
                content: item.content.clone(),
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    let turn = state.orchestrator.run_turn(message, ai_role, &history).await;

    state
        .conversations
        .append_turn(auth.user_id, ai_role, message, &turn.reply, &turn.emotion)
        .await?;

    Ok(Json(ChatResponse {
        reply: turn.reply,
        emotion_data: turn.emotion,
        crisis_data: turn.crisis,
        is_crisis_response: turn.is_crisis_response,
    }))
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_data: Option<EmotionSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_role: Option<AiRole>,
}

pub async fn history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let response = match state.conversations.latest(auth.user_id).await? {
        Some(conversation) => HistoryResponse {
            messages: conversation.messages,
            emotion_data: conversation.emotion_data,
            ai_role: Some(conversation.ai_role),
        },
        None => HistoryResponse {
            messages: Vec::new(),
            emotion_data: None,
            ai_role: None,
        },
    };

    Ok(Json(response))
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub message: String,
}

pub async fn clear(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ClearResponse>, ApiError> {
    state.conversations.clear(auth.user_id).await?;

    Ok(Json(ClearResponse {
        message: "对话已清空".to_string(),
    }))
}
