//! Bedrock-backed implementation of [`SupportModel`].
//!
//! Each capability is one Converse API call. The classifiers instruct the
//! model to answer with a single JSON object, which is parsed into the
//! domain snapshot types; a non-conforming answer is a schema violation
//! (absorbed by the orchestrator's fallback policy).

use async_trait::async_trait;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock,
};
use aws_sdk_bedrockruntime::Client;
use tracing::info;

use mindwell_core::models::conversation::{AiRole, ChatRole};
use mindwell_core::models::emotion::{CrisisSnapshot, EmotionSnapshot};

use crate::error::LlmError;
use crate::prompts;
use crate::provider::{PromptMessage, SupportModel};

/// A Bedrock chat model addressed by inference profile id.
#[derive(Debug, Clone)]
pub struct BedrockModel {
    client: Client,
    model_id: String,
}

impl BedrockModel {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            model_id: model_id.into(),
        }
    }

    /// Send a transcript through the Converse API and return the response
    /// text.
    async fn converse(
        &self,
        system_prompt: &str,
        messages: &[PromptMessage],
    ) -> Result<String, LlmError> {
        let mut converse_messages: Vec<Message> = Vec::new();

        for msg in messages {
            let role = match msg.role {
                ChatRole::User => ConversationRole::User,
                ChatRole::Assistant => ConversationRole::Assistant,
            };
            let message = Message::builder()
                .role(role)
                .content(ContentBlock::Text(msg.content.clone()))
                .build()
                .map_err(|e| LlmError::Invocation(e.to_string()))?;
            converse_messages.push(message);
        }

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .set_messages(Some(converse_messages))
            .send()
            .await
            .map_err(|e| LlmError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| LlmError::ResponseParse("no message in response".to_string()))?;

        let response_text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(response_text)
    }

    /// One-shot classification call: a single user message, JSON back.
    async fn classify(&self, system_prompt: &str, text: &str) -> Result<String, LlmError> {
        self.converse(system_prompt, &[PromptMessage::user(text)])
            .await
    }
}

#[async_trait]
impl SupportModel for BedrockModel {
    async fn recognize_emotion(&self, text: &str) -> Result<EmotionSnapshot, LlmError> {
        let response_text = self.classify(prompts::EMOTION_SYSTEM_PROMPT, text).await?;

        let snapshot: EmotionSnapshot =
            serde_json::from_str(&response_text).map_err(|e| {
                LlmError::SchemaViolation(format!(
                    "failed to parse EmotionSnapshot: {e}. Response: {response_text}"
                ))
            })?;

        Ok(snapshot.clamped())
    }

    async fn detect_crisis(&self, text: &str) -> Result<CrisisSnapshot, LlmError> {
        let response_text = self.classify(prompts::CRISIS_SYSTEM_PROMPT, text).await?;

        let snapshot: CrisisSnapshot =
            serde_json::from_str(&response_text).map_err(|e| {
                LlmError::SchemaViolation(format!(
                    "failed to parse CrisisSnapshot: {e}. Response: {response_text}"
                ))
            })?;

        Ok(snapshot)
    }

    async fn generate_reply(
        &self,
        messages: &[PromptMessage],
        role: AiRole,
        emotion: &EmotionSnapshot,
    ) -> Result<String, LlmError> {
        let system_prompt = prompts::reply_system_prompt(role, emotion);
        let reply = self.converse(&system_prompt, messages).await?;

        info!(
            model_id = %self.model_id,
            role = role.as_str(),
            turns = messages.len(),
            reply_len = reply.len(),
            "generated companion reply"
        );

        if reply.trim().is_empty() {
            return Ok(prompts::EMPTY_REPLY.to_string());
        }
        Ok(reply)
    }
}
