use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use mindwell_auth::jwt;

use crate::error::ApiError;
use crate::state::AppState;

/// JWT validation middleware.
///
/// Extracts the `Authorization: Bearer <token>` header, validates the token,
/// and inserts [`AuthUser`] into request extensions for handlers to use.
/// Every scoped query downstream keys off `AuthUser::user_id`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("未授权，缺少访问令牌".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("未授权，缺少访问令牌".to_string()))?;

    let claims = jwt::validate_token(token, state.jwt_secret.as_bytes())
        .map_err(|_| ApiError::Unauthorized("无效的访问令牌".to_string()))?;

    req.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        anonymous_id: claims.anonymous_id,
    });

    Ok(next.run(req).await)
}

/// Authenticated user extracted from JWT claims.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    #[allow(dead_code)]
    pub anonymous_id: String,
}
