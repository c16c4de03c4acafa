use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<mindwell_storage::error::StorageError> for ApiError {
    fn from(e: mindwell_storage::error::StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<mindwell_auth::error::AuthError> for ApiError {
    fn from(e: mindwell_auth::error::AuthError) -> Self {
        use mindwell_auth::error::AuthError;
        match e {
            AuthError::TokenExpired | AuthError::InvalidToken(_) => {
                ApiError::Unauthorized("无效的访问令牌".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<mindwell_instruments::scoring::ValidationError> for ApiError {
    fn from(e: mindwell_instruments::scoring::ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
