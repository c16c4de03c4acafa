use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use mindwell_auth::{jwt, password};
use mindwell_core::models::user::UserProfile;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("邮箱格式不正确".to_string()));
    }
    if body.password.len() < 6 {
        return Err(ApiError::BadRequest("密码至少需要6个字符".to_string()));
    }

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::BadRequest("用户已存在".to_string()));
    }

    let password_hash = password::hash_password(&body.password)?;
    let user = state
        .users
        .create_registered(&email, &password_hash, body.phone.as_deref())
        .await?;

    let token = jwt::issue_token(&user, state.jwt_secret.as_bytes())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "注册成功".to_string(),
            token,
            user: UserProfile::from(&user),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = body.email.trim().to_lowercase();

    // One indistinguishable message for unknown email and wrong password.
    let unauthorized = || ApiError::Unauthorized("邮箱或密码错误".to_string());

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(unauthorized)?;

    let hash = user.password_hash.clone().ok_or_else(unauthorized)?;
    if !password::verify_password(&body.password, &hash)? {
        return Err(unauthorized());
    }

    let token = jwt::issue_token(&user, state.jwt_secret.as_bytes())?;

    Ok(Json(AuthResponse {
        message: "登录成功".to_string(),
        token,
        user: UserProfile::from(&user),
    }))
}

pub async fn anonymous(
    State(state): State<AppState>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state.users.create_anonymous().await?;
    let token = jwt::issue_token(&user, state.jwt_secret.as_bytes())?;

    Ok(Json(AuthResponse {
        message: "匿名体验创建成功".to_string(),
        token,
        user: UserProfile::from(&user),
    }))
}
