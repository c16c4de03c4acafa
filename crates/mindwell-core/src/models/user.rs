use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// An account record. Registered users carry an email and password hash;
/// anonymous sessions carry neither. `anonymous_id` is always set: it is the
/// stable pseudonymous handle for a user, registered or not.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub anonymous_id: String,
    pub is_anonymous: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    pub deleted_at: Option<jiff::Timestamp>,
}

/// The public view of a user, as returned by the API.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: Option<String>,
    pub anonymous_id: String,
    pub is_anonymous: bool,
    pub created_at: jiff::Timestamp,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            anonymous_id: user.anonymous_id.clone(),
            is_anonymous: user.is_anonymous,
            created_at: user.created_at,
        }
    }
}

impl User {
    /// Generate a fresh pseudonymous handle, e.g. `anon_1c0e8b...`.
    pub fn new_anonymous_id() -> String {
        format!("anon_{}", Uuid::new_v4().simple())
    }
}
