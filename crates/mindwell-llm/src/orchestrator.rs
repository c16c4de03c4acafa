//! The per-turn chat state machine: emotion tagging, crisis detection, and
//! the branch between the fixed safety response and free-form reply
//! generation.
//!
//! Every model call runs under a bounded timeout, and every failure
//! (provider error, schema violation, timeout) is replaced by a documented
//! default. Validation aside, a chat turn cannot fail.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use mindwell_core::models::conversation::AiRole;
use mindwell_core::models::emotion::{CrisisSnapshot, EmotionSnapshot, RiskLevel};

use crate::error::LlmError;
use crate::prompts;
use crate::provider::{PromptMessage, SupportModel};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the caller gets back from one turn. The crisis snapshot is
/// included even when the normal branch was taken; the client renders it.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub reply: String,
    pub emotion: EmotionSnapshot,
    pub crisis: CrisisSnapshot,
    pub is_crisis_response: bool,
}

/// Sequences the model calls for one inbound message.
#[derive(Clone)]
pub struct ChatOrchestrator {
    model: Arc<dyn SupportModel>,
    call_timeout: Duration,
}

impl ChatOrchestrator {
    pub fn new(model: Arc<dyn SupportModel>) -> Self {
        Self {
            model,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Run one chat turn: classify, branch, and produce the reply.
    ///
    /// `history` is the prior transcript; `message` is the new user turn
    /// (already validated as non-empty by the caller).
    pub async fn run_turn(
        &self,
        message: &str,
        role: AiRole,
        history: &[PromptMessage],
    ) -> ChatTurn {
        let emotion = match self.bounded(self.model.recognize_emotion(message)).await {
            Ok(snapshot) => snapshot.clamped(),
            Err(e) => {
                warn!(error = %e, "emotion recognition failed, using neutral default");
                EmotionSnapshot::default()
            }
        };

        let crisis = match self.bounded(self.model.detect_crisis(message)).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "crisis detection failed, using safe default");
                CrisisSnapshot::default()
            }
        };

        // Safety override: at high risk the reply is the fixed template and
        // the generation capability is never invoked.
        if crisis.is_crisis && crisis.risk_level == RiskLevel::High {
            warn!("crisis branch taken, returning safety response");
            return ChatTurn {
                reply: prompts::crisis_response(&crisis.suggestions),
                emotion,
                crisis,
                is_crisis_response: true,
            };
        }

        let mut transcript: Vec<PromptMessage> = history.to_vec();
        transcript.push(PromptMessage::user(message));

        let reply = match self
            .bounded(self.model.generate_reply(&transcript, role, &emotion))
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "reply generation failed, using fallback reply");
                prompts::FALLBACK_REPLY.to_string()
            }
        };

        ChatTurn {
            reply,
            emotion,
            crisis,
            is_crisis_response: false,
        }
    }

    /// Apply the per-call timeout to a model future.
    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, LlmError>>,
    ) -> Result<T, LlmError> {
        tokio::time::timeout(self.call_timeout, fut)
            .await
            .unwrap_or(Err(LlmError::Timeout(self.call_timeout)))
    }
}
