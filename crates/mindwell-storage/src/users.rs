//! User repository. Soft-deleted rows are invisible to every lookup.

use sqlx::FromRow;
use tracing::info;
use uuid::Uuid;

use mindwell_core::models::user::User;

use crate::error::StorageError;
use crate::pool::Database;
use crate::{from_millis, to_millis};

#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: Option<String>,
    password_hash: Option<String>,
    phone: Option<String>,
    anonymous_id: String,
    is_anonymous: i64,
    created_at: i64,
    updated_at: i64,
    deleted_at: Option<i64>,
}

impl UserRow {
    fn into_user(self) -> Result<User, StorageError> {
        Ok(User {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| StorageError::Corrupt(format!("bad user id {}: {e}", self.id)))?,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            anonymous_id: self.anonymous_id,
            is_anonymous: self.is_anonymous != 0,
            created_at: from_millis(self.created_at)?,
            updated_at: from_millis(self.updated_at)?,
            deleted_at: self.deleted_at.map(from_millis).transpose()?,
        })
    }
}

const SELECT_COLUMNS: &str = "id, email, password_hash, phone, anonymous_id, is_anonymous, \
                              created_at, updated_at, deleted_at";

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a registered user. The caller has already hashed the password.
    pub async fn create_registered(
        &self,
        email: &str,
        password_hash: &str,
        phone: Option<&str>,
    ) -> Result<User, StorageError> {
        let user = User {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            password_hash: Some(password_hash.to_string()),
            phone: phone.map(|p| p.to_string()),
            anonymous_id: User::new_anonymous_id(),
            is_anonymous: false,
            created_at: jiff::Timestamp::now(),
            updated_at: jiff::Timestamp::now(),
            deleted_at: None,
        };
        self.insert(&user).await?;
        info!(user_id = %user.id, "registered user created");
        Ok(user)
    }

    /// Insert an anonymous trial user.
    pub async fn create_anonymous(&self) -> Result<User, StorageError> {
        let user = User {
            id: Uuid::new_v4(),
            email: None,
            password_hash: None,
            phone: None,
            anonymous_id: User::new_anonymous_id(),
            is_anonymous: true,
            created_at: jiff::Timestamp::now(),
            updated_at: jiff::Timestamp::now(),
            deleted_at: None,
        };
        self.insert(&user).await?;
        info!(user_id = %user.id, "anonymous user created");
        Ok(user)
    }

    async fn insert(&self, user: &User) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, phone, anonymous_id, is_anonymous,
                               created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(&user.anonymous_id)
        .bind(user.is_anonymous as i64)
        .bind(to_millis(user.created_at))
        .bind(to_millis(user.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE email = ? AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Partial profile update; `None` fields are left untouched.
    pub async fn update_profile(
        &self,
        id: Uuid,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<User>, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .bind(phone)
        .bind(to_millis(jiff::Timestamp::now()))
        .bind(id.to_string())
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Mark the account deleted. The row is kept; lookups stop seeing it.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(to_millis(jiff::Timestamp::now()))
        .bind(id.to_string())
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
