//! SQLite connection pool and schema creation.

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::StorageError;

/// Shared handle to the SQLite pool; creates the database file if missing
/// and applies the schema on connect.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database at the given file path.
    pub async fn connect(path: &str) -> Result<Self, StorageError> {
        info!(path, "opening sqlite database");

        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .filename(path);

        let pool = SqlitePool::connect_with(options).await?;
        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    /// The underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE,
                password_hash TEXT,
                phone TEXT,
                anonymous_id TEXT NOT NULL UNIQUE,
                is_anonymous INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                deleted_at INTEGER
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                ai_role TEXT NOT NULL,
                messages TEXT NOT NULL DEFAULT '[]',
                emotion_data TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS mood_diaries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                mood TEXT NOT NULL,
                intensity INTEGER NOT NULL,
                triggers TEXT,
                notes TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS assessments (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                kind TEXT NOT NULL,
                answers TEXT NOT NULL,
                score INTEGER NOT NULL,
                interpretation TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
            "CREATE INDEX IF NOT EXISTS idx_users_anonymous_id ON users(anonymous_id)",
            "CREATE INDEX IF NOT EXISTS idx_conversations_user_id ON conversations(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_conversations_created_at ON conversations(created_at)",
            "CREATE INDEX IF NOT EXISTS idx_mood_diaries_user_id ON mood_diaries(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_mood_diaries_created_at ON mood_diaries(created_at)",
            "CREATE INDEX IF NOT EXISTS idx_assessments_user_id ON assessments(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_assessments_kind ON assessments(kind)",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("database schema ready");
        Ok(())
    }
}
