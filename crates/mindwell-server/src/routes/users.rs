use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use mindwell_core::models::user::UserProfile;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("用户不存在".to_string()))?;

    Ok(Json(ProfileResponse {
        user: UserProfile::from(&user),
    }))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub user: UserProfile,
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    if let Some(email) = &body.email
        && !email.contains('@')
    {
        return Err(ApiError::BadRequest("邮箱格式不正确".to_string()));
    }

    let user = state
        .users
        .update_profile(auth.user_id, body.email.as_deref(), body.phone.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("用户不存在".to_string()))?;

    Ok(Json(UpdateProfileResponse {
        message: "用户信息已更新".to_string(),
        user: UserProfile::from(&user),
    }))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn delete_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.users.soft_delete(auth.user_id).await? {
        return Err(ApiError::NotFound("用户不存在".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "账户已删除".to_string(),
    }))
}

#[derive(Serialize)]
pub struct UsageStats {
    pub conversations: i64,
    pub diaries: i64,
    pub assessments: i64,
}

#[derive(Serialize)]
pub struct UsageStatsResponse {
    pub stats: UsageStats,
}

pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UsageStatsResponse>, ApiError> {
    let conversations = state.conversations.count(auth.user_id).await?;
    let diaries = state.diaries.count(auth.user_id).await?;
    let assessments = state.assessments.count(auth.user_id).await?;

    Ok(Json(UsageStatsResponse {
        stats: UsageStats {
            conversations,
            diaries,
            assessments,
        },
    }))
}
