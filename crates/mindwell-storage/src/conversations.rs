//! Conversation repository.
//!
//! A user's "current" conversation is the most recently created row for that
//! user. `append_turn` performs the find-or-create and the append of exactly
//! one user/assistant message pair inside a single transaction, so two
//! concurrent turns for the same user cannot interleave their appends.

use std::str::FromStr;

use sqlx::FromRow;
use tracing::info;
use uuid::Uuid;

use mindwell_core::models::conversation::{AiRole, ChatMessage, ChatRole, Conversation};
use mindwell_core::models::emotion::EmotionSnapshot;

use crate::error::StorageError;
use crate::pool::Database;
use crate::{from_millis, to_millis};

#[derive(Clone)]
pub struct ConversationRepository {
    db: Database,
}

#[derive(FromRow)]
struct ConversationRow {
    id: String,
    user_id: String,
    ai_role: String,
    messages: String,
    emotion_data: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl ConversationRow {
    fn into_conversation(self) -> Result<Conversation, StorageError> {
        Ok(Conversation {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| StorageError::Corrupt(format!("bad conversation id: {e}")))?,
            user_id: Uuid::parse_str(&self.user_id)
                .map_err(|e| StorageError::Corrupt(format!("bad user id: {e}")))?,
            ai_role: AiRole::from_str(&self.ai_role)
                .map_err(|e| StorageError::Corrupt(e.to_string()))?,
            messages: serde_json::from_str(&self.messages)?,
            emotion_data: self
                .emotion_data
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            created_at: from_millis(self.created_at)?,
            updated_at: from_millis(self.updated_at)?,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, user_id, ai_role, messages, emotion_data, created_at, updated_at";

impl ConversationRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The user's current conversation, if any.
    pub async fn latest(&self, user_id: Uuid) -> Result<Option<Conversation>, StorageError> {
        let row: Option<ConversationRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM conversations \
             WHERE user_id = ? ORDER BY created_at DESC, rowid DESC LIMIT 1"
        ))
        .bind(user_id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        row.map(ConversationRow::into_conversation).transpose()
    }

    /// Append one turn (the user's message and the assistant's reply) to
    /// the user's current conversation, creating it (seeded with the
    /// selected persona) when none exists. The stored emotion snapshot is
    /// overwritten with this turn's result.
    pub async fn append_turn(
        &self,
        user_id: Uuid,
        ai_role: AiRole,
        user_message: &str,
        assistant_reply: &str,
        emotion: &EmotionSnapshot,
    ) -> Result<Conversation, StorageError> {
        let mut tx = self.db.pool().begin().await?;

        let existing: Option<ConversationRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM conversations \
             WHERE user_id = ? ORDER BY created_at DESC, rowid DESC LIMIT 1"
        ))
        .bind(user_id.to_string())
        .fetch_optional(&mut *tx)
        .await?;

        let now = jiff::Timestamp::now();
        let pair = [
            ChatMessage {
                role: ChatRole::User,
                content: user_message.to_string(),
                timestamp: now,
            },
            ChatMessage {
                role: ChatRole::Assistant,
                content: assistant_reply.to_string(),
                timestamp: now,
            },
        ];
        let emotion_json = serde_json::to_string(emotion)?;

        let conversation = match existing {
            Some(row) => {
                let mut conversation = row.into_conversation()?;
                conversation.messages.extend(pair);
                conversation.emotion_data = Some(emotion.clone());
                conversation.updated_at = now;

                sqlx::query(
                    "UPDATE conversations SET messages = ?, emotion_data = ?, updated_at = ? \
                     WHERE id = ?",
                )
                .bind(serde_json::to_string(&conversation.messages)?)
                .bind(&emotion_json)
                .bind(to_millis(now))
                .bind(conversation.id.to_string())
                .execute(&mut *tx)
                .await?;

                conversation
            }
            None => {
                let conversation = Conversation {
                    id: Uuid::new_v4(),
                    user_id,
                    ai_role,
                    messages: pair.to_vec(),
                    emotion_data: Some(emotion.clone()),
                    created_at: now,
                    updated_at: now,
                };

                sqlx::query(
                    "INSERT INTO conversations \
                     (id, user_id, ai_role, messages, emotion_data, created_at, updated_at) \
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(conversation.id.to_string())
                .bind(user_id.to_string())
                .bind(ai_role.as_str())
                .bind(serde_json::to_string(&conversation.messages)?)
                .bind(&emotion_json)
                .bind(to_millis(now))
                .bind(to_millis(now))
                .execute(&mut *tx)
                .await?;

                info!(user_id = %user_id, role = ai_role.as_str(), "conversation created");
                conversation
            }
        };

        tx.commit().await?;
        Ok(conversation)
    }

    /// Delete all of the user's conversations. Returns how many were removed.
    pub async fn clear(&self, user_id: Uuid) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM conversations WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(self.db.pool())
            .await?;

        info!(user_id = %user_id, deleted = result.rows_affected(), "conversations cleared");
        Ok(result.rows_affected())
    }

    pub async fn count(&self, user_id: Uuid) -> Result<i64, StorageError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM conversations WHERE user_id = ?")
                .bind(user_id.to_string())
                .fetch_one(self.db.pool())
                .await?;
        Ok(count)
    }
}
