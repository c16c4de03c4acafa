//! Mood diary repository: CRUD plus the aggregate statistics behind the
//! diary dashboard.

use std::str::FromStr;

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use mindwell_core::models::mood_diary::{Mood, MoodDiary};

use crate::error::StorageError;
use crate::pool::Database;
use crate::{from_millis, to_millis};

#[derive(Clone)]
pub struct MoodDiaryRepository {
    db: Database,
}

/// Filters for the diary listing.
#[derive(Debug, Clone, Default)]
pub struct DiaryListQuery {
    pub start: Option<jiff::Timestamp>,
    pub end: Option<jiff::Timestamp>,
    pub page: i64,
    pub limit: i64,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct DiaryUpdate {
    pub mood: Option<Mood>,
    pub intensity: Option<i64>,
    pub triggers: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Count and average intensity for one mood within the window.
#[derive(Debug, Clone, Serialize)]
pub struct MoodStat {
    pub mood: Mood,
    pub count: i64,
    pub avg_intensity: f64,
}

/// Count and average intensity for one calendar day within the window.
#[derive(Debug, Clone, Serialize)]
pub struct DayStat {
    pub date: String,
    pub count: i64,
    pub avg_intensity: f64,
}

/// Aggregates over a trailing window of days.
#[derive(Debug, Clone, Serialize)]
pub struct DiaryStats {
    pub stats: Vec<MoodStat>,
    pub trend: Vec<DayStat>,
}

#[derive(FromRow)]
struct DiaryRow {
    id: String,
    user_id: String,
    mood: String,
    intensity: i64,
    triggers: Option<String>,
    notes: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl DiaryRow {
    fn into_diary(self) -> Result<MoodDiary, StorageError> {
        Ok(MoodDiary {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| StorageError::Corrupt(format!("bad diary id: {e}")))?,
            user_id: Uuid::parse_str(&self.user_id)
                .map_err(|e| StorageError::Corrupt(format!("bad user id: {e}")))?,
            mood: Mood::from_str(&self.mood).map_err(|e| StorageError::Corrupt(e.to_string()))?,
            intensity: self.intensity,
            triggers: self
                .triggers
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            notes: self.notes,
            created_at: from_millis(self.created_at)?,
            updated_at: from_millis(self.updated_at)?,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, user_id, mood, intensity, triggers, notes, created_at, updated_at";

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

impl MoodDiaryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        mood: Mood,
        intensity: i64,
        triggers: Option<Vec<String>>,
        notes: Option<String>,
    ) -> Result<MoodDiary, StorageError> {
        let now = jiff::Timestamp::now();
        let diary = MoodDiary {
            id: Uuid::new_v4(),
            user_id,
            mood,
            intensity,
            triggers,
            notes,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO mood_diaries \
             (id, user_id, mood, intensity, triggers, notes, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(diary.id.to_string())
        .bind(user_id.to_string())
        .bind(mood.as_str())
        .bind(intensity)
        .bind(
            diary
                .triggers
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        )
        .bind(&diary.notes)
        .bind(to_millis(now))
        .bind(to_millis(now))
        .execute(self.db.pool())
        .await?;

        Ok(diary)
    }

    /// Page through the user's entries, newest first. Returns the page and
    /// the user's total entry count.
    pub async fn list(
        &self,
        user_id: Uuid,
        query: &DiaryListQuery,
    ) -> Result<(Vec<MoodDiary>, i64), StorageError> {
        let page = query.page.max(1);
        let limit = query.limit.clamp(1, 100);
        let start = query.start.map(to_millis).unwrap_or(i64::MIN);
        let end = query.end.map(to_millis).unwrap_or(i64::MAX);

        let rows: Vec<DiaryRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM mood_diaries \
             WHERE user_id = ? AND created_at >= ? AND created_at <= ? \
             ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(user_id.to_string())
        .bind(start)
        .bind(end)
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(self.db.pool())
        .await?;

        let diaries = rows
            .into_iter()
            .map(DiaryRow::into_diary)
            .collect::<Result<Vec<_>, _>>()?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM mood_diaries WHERE user_id = ?")
                .bind(user_id.to_string())
                .fetch_one(self.db.pool())
                .await?;

        Ok((diaries, total))
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<MoodDiary>, StorageError> {
        let row: Option<DiaryRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM mood_diaries WHERE id = ? AND user_id = ?"
        ))
        .bind(id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        row.map(DiaryRow::into_diary).transpose()
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &DiaryUpdate,
    ) -> Result<Option<MoodDiary>, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE mood_diaries
            SET mood = COALESCE(?, mood),
                intensity = COALESCE(?, intensity),
                triggers = COALESCE(?, triggers),
                notes = COALESCE(?, notes),
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(update.mood.map(|m| m.as_str()))
        .bind(update.intensity)
        .bind(
            update
                .triggers
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        )
        .bind(&update.notes)
        .bind(to_millis(jiff::Timestamp::now()))
        .bind(id.to_string())
        .bind(user_id.to_string())
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(user_id, id).await
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM mood_diaries WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Per-mood and per-day aggregates over the trailing `days` window.
    /// Entries older than the cutoff are excluded.
    pub async fn stats(&self, user_id: Uuid, days: i64) -> Result<DiaryStats, StorageError> {
        let cutoff = to_millis(jiff::Timestamp::now()) - days * MS_PER_DAY;

        let mood_rows: Vec<(String, i64, f64)> = sqlx::query_as(
            "SELECT mood, COUNT(*) as count, AVG(intensity) as avg_intensity \
             FROM mood_diaries WHERE user_id = ? AND created_at >= ? \
             GROUP BY mood ORDER BY count DESC",
        )
        .bind(user_id.to_string())
        .bind(cutoff)
        .fetch_all(self.db.pool())
        .await?;

        let stats = mood_rows
            .into_iter()
            .map(|(mood, count, avg_intensity)| {
                Ok(MoodStat {
                    mood: Mood::from_str(&mood)
                        .map_err(|e| StorageError::Corrupt(e.to_string()))?,
                    count,
                    avg_intensity,
                })
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        let trend_rows: Vec<(String, i64, f64)> = sqlx::query_as(
            "SELECT DATE(created_at / 1000, 'unixepoch') as date, \
                    COUNT(*) as count, AVG(intensity) as avg_intensity \
             FROM mood_diaries WHERE user_id = ? AND created_at >= ? \
             GROUP BY date ORDER BY date ASC",
        )
        .bind(user_id.to_string())
        .bind(cutoff)
        .fetch_all(self.db.pool())
        .await?;

        let trend = trend_rows
            .into_iter()
            .map(|(date, count, avg_intensity)| DayStat {
                date,
                count,
                avg_intensity,
            })
            .collect();

        Ok(DiaryStats { stats, trend })
    }

    pub async fn count(&self, user_id: Uuid) -> Result<i64, StorageError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM mood_diaries WHERE user_id = ?")
                .bind(user_id.to_string())
                .fetch_one(self.db.pool())
                .await?;
        Ok(count)
    }
}
