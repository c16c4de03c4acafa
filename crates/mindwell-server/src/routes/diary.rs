use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mindwell_core::models::mood_diary::{Mood, MoodDiary};
use mindwell_storage::diaries::{DiaryListQuery, DiaryStats, DiaryUpdate};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;

fn parse_mood(raw: &str) -> Result<Mood, ApiError> {
    Mood::from_str(raw).map_err(|_| ApiError::BadRequest("无效的情绪类型".to_string()))
}

fn check_intensity(intensity: i64) -> Result<(), ApiError> {
    if !(1..=10).contains(&intensity) {
        return Err(ApiError::BadRequest("强度必须在1-10之间".to_string()));
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct CreateDiaryRequest {
    pub mood: String,
    pub intensity: i64,
    pub triggers: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct DiaryResponse {
    pub message: String,
    pub diary: MoodDiary,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateDiaryRequest>,
) -> Result<(StatusCode, Json<DiaryResponse>), ApiError> {
    let mood = parse_mood(&body.mood)?;
    check_intensity(body.intensity)?;

    let diary = state
        .diaries
        .create(auth.user_id, mood, body.intensity, body.triggers, body.notes)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DiaryResponse {
            message: "情绪日记已保存".to_string(),
            diary,
        }),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub diaries: Vec<MoodDiary>,
    pub pagination: Pagination,
}

/// Accept either a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date
/// (interpreted as midnight UTC).
fn parse_date(raw: &str) -> Result<jiff::Timestamp, ApiError> {
    if let Ok(ts) = jiff::Timestamp::from_str(raw) {
        return Ok(ts);
    }
    let bad_date = || ApiError::BadRequest("日期格式不正确".to_string());
    let date = raw.parse::<jiff::civil::Date>().map_err(|_| bad_date())?;
    let zoned = date.to_zoned(jiff::tz::TimeZone::UTC).map_err(|_| bad_date())?;
    Ok(zoned.timestamp())
}

pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

    let query = DiaryListQuery {
        start: params.start_date.as_deref().map(parse_date).transpose()?,
        end: params.end_date.as_deref().map(parse_date).transpose()?,
        page,
        limit,
    };

    let (diaries, total) = state.diaries.list(auth.user_id, &query).await?;

    Ok(Json(ListResponse {
        diaries,
        pagination: Pagination {
            page,
            limit,
            total,
            pages: (total + limit - 1) / limit,
        },
    }))
}

#[derive(Deserialize)]
pub struct StatsParams {
    pub days: Option<i64>,
}

pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<StatsParams>,
) -> Result<Json<DiaryStats>, ApiError> {
    let days = params.days.unwrap_or(7).clamp(1, 365);
    let stats = state.diaries.stats(auth.user_id, days).await?;
    Ok(Json(stats))
}

#[derive(Serialize)]
pub struct GetDiaryResponse {
    pub diary: MoodDiary,
}

pub async fn get_one(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<GetDiaryResponse>, ApiError> {
    let diary = state
        .diaries
        .get(auth.user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("日记不存在".to_string()))?;

    Ok(Json(GetDiaryResponse { diary }))
}

#[derive(Deserialize)]
pub struct UpdateDiaryRequest {
    pub mood: Option<String>,
    pub intensity: Option<i64>,
    pub triggers: Option<Vec<String>>,
    pub notes: Option<String>,
}

pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDiaryRequest>,
) -> Result<Json<DiaryResponse>, ApiError> {
    let mood = body.mood.as_deref().map(parse_mood).transpose()?;
    if let Some(intensity) = body.intensity {
        check_intensity(intensity)?;
    }

    let update = DiaryUpdate {
        mood,
        intensity: body.intensity,
        triggers: body.triggers,
        notes: body.notes,
    };

    let diary = state
        .diaries
        .update(auth.user_id, id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("日记不存在".to_string()))?;

    Ok(Json(DiaryResponse {
        message: "日记已更新".to_string(),
        diary,
    }))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.diaries.delete(auth.user_id, id).await? {
        return Err(ApiError::NotFound("日记不存在".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "日记已删除".to_string(),
    }))
}
