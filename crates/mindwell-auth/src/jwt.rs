use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mindwell_core::models::user::User;

use crate::error::AuthError;

/// Registered sessions stay valid for a week.
pub const REGISTERED_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
/// Anonymous trial sessions expire after a day.
pub const ANONYMOUS_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims carried by a MindWell access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user id every query is scoped by.
    pub sub: Uuid,
    pub anonymous_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Issue an HS256 token for a user. Anonymous users get the short TTL.
pub fn issue_token(user: &User, secret: &[u8]) -> Result<String, AuthError> {
    let ttl = if user.is_anonymous {
        ANONYMOUS_TOKEN_TTL_SECS
    } else {
        REGISTERED_TOKEN_TTL_SECS
    };
    issue_token_with_ttl(user, secret, ttl)
}

/// Issue a token with an explicit TTL in seconds.
pub fn issue_token_with_ttl(
    user: &User,
    secret: &[u8],
    ttl_secs: i64,
) -> Result<String, AuthError> {
    let now = jiff::Timestamp::now().as_second();
    let claims = Claims {
        sub: user.id,
        anonymous_id: user.anonymous_id.clone(),
        email: user.email.clone(),
        iat: now,
        exp: now + ttl_secs,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )?;
    Ok(token)
}

/// Validate a token and return its claims. Expiry is always checked.
pub fn validate_token(token: &str, secret: &[u8]) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        })?;

    Ok(token_data.claims)
}
