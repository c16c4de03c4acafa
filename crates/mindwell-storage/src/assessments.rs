//! Assessment repository. Rows are write-once; there is no update path.

use std::str::FromStr;

use sqlx::FromRow;
use uuid::Uuid;

use mindwell_core::models::assessment::{AnswerEntry, Assessment, AssessmentKind};

use crate::error::StorageError;
use crate::pool::Database;
use crate::{from_millis, to_millis};

/// How many past results the history endpoint returns.
const HISTORY_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct AssessmentRepository {
    db: Database,
}

#[derive(FromRow)]
struct AssessmentRow {
    id: String,
    user_id: String,
    kind: String,
    answers: String,
    score: i64,
    interpretation: String,
    created_at: i64,
}

impl AssessmentRow {
    fn into_assessment(self) -> Result<Assessment, StorageError> {
        Ok(Assessment {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| StorageError::Corrupt(format!("bad assessment id: {e}")))?,
            user_id: Uuid::parse_str(&self.user_id)
                .map_err(|e| StorageError::Corrupt(format!("bad user id: {e}")))?,
            kind: AssessmentKind::from_str(&self.kind)
                .map_err(|e| StorageError::Corrupt(e.to_string()))?,
            answers: serde_json::from_str(&self.answers)?,
            score: self.score,
            interpretation: self.interpretation,
            created_at: from_millis(self.created_at)?,
        })
    }
}

const SELECT_COLUMNS: &str = "id, user_id, kind, answers, score, interpretation, created_at";

impl AssessmentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        kind: AssessmentKind,
        answers: &[AnswerEntry],
        score: i64,
        interpretation: &str,
    ) -> Result<Assessment, StorageError> {
        let assessment = Assessment {
            id: Uuid::new_v4(),
            user_id,
            kind,
            answers: answers.to_vec(),
            score,
            interpretation: interpretation.to_string(),
            created_at: jiff::Timestamp::now(),
        };

        sqlx::query(
            "INSERT INTO assessments \
             (id, user_id, kind, answers, score, interpretation, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(assessment.id.to_string())
        .bind(user_id.to_string())
        .bind(kind.as_str())
        .bind(serde_json::to_string(&assessment.answers)?)
        .bind(score)
        .bind(interpretation)
        .bind(to_millis(assessment.created_at))
        .execute(self.db.pool())
        .await?;

        Ok(assessment)
    }

    /// The user's most recent results of one kind, newest first.
    pub async fn list_recent(
        &self,
        user_id: Uuid,
        kind: AssessmentKind,
    ) -> Result<Vec<Assessment>, StorageError> {
        let rows: Vec<AssessmentRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM assessments \
             WHERE user_id = ? AND kind = ? \
             ORDER BY created_at DESC LIMIT ?"
        ))
        .bind(user_id.to_string())
        .bind(kind.as_str())
        .bind(HISTORY_LIMIT)
        .fetch_all(self.db.pool())
        .await?;

        rows.into_iter().map(AssessmentRow::into_assessment).collect()
    }

    pub async fn get(
        &self,
        user_id: Uuid,
        kind: AssessmentKind,
        id: Uuid,
    ) -> Result<Option<Assessment>, StorageError> {
        let row: Option<AssessmentRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM assessments \
             WHERE id = ? AND kind = ? AND user_id = ?"
        ))
        .bind(id.to_string())
        .bind(kind.as_str())
        .bind(user_id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        row.map(AssessmentRow::into_assessment).transpose()
    }

    pub async fn count(&self, user_id: Uuid) -> Result<i64, StorageError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM assessments WHERE user_id = ?")
                .bind(user_id.to_string())
                .fetch_one(self.db.pool())
                .await?;
        Ok(count)
    }
}
