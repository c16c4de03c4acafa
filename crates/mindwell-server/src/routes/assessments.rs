use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use mindwell_core::models::assessment::{AnswerEntry, Assessment, AssessmentKind};
use mindwell_instruments::scoring::{AnswerOption, SeverityBand};
use mindwell_instruments::{get_instrument, Instrument};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Resolve a path segment to an instrument, or 400 for anything else
/// (including the reserved-but-unimplemented kinds).
fn resolve(kind: &str) -> Result<(AssessmentKind, Box<dyn Instrument>), ApiError> {
    let unsupported = || ApiError::BadRequest("不支持的测评类型".to_string());
    let kind = AssessmentKind::from_str(kind).map_err(|_| unsupported())?;
    let instrument = get_instrument(kind).ok_or_else(unsupported)?;
    Ok((kind, instrument))
}

#[derive(Serialize)]
pub struct QuestionView {
    pub id: i64,
    pub question: String,
    pub options: Vec<AnswerOption>,
}

#[derive(Serialize)]
pub struct QuestionnaireResponse {
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    pub name: String,
    pub description: String,
    pub questions: Vec<QuestionView>,
    /// The canonical severity band table; clients render their labels from
    /// this instead of carrying their own copy.
    pub scoring: Vec<SeverityBand>,
}

pub async fn questionnaire(
    Path(kind): Path<String>,
) -> Result<Json<QuestionnaireResponse>, ApiError> {
    let (kind, instrument) = resolve(&kind)?;

    let options = instrument.options().to_vec();
    let questions = instrument
        .questions()
        .iter()
        .map(|q| QuestionView {
            id: q.id,
            question: q.text.clone(),
            options: options.clone(),
        })
        .collect();

    Ok(Json(QuestionnaireResponse {
        kind,
        name: instrument.name().to_string(),
        description: instrument.description().to_string(),
        questions,
        scoring: instrument.bands().to_vec(),
    }))
}

#[derive(serde::Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<AnswerEntry>,
}

#[derive(Serialize)]
pub struct AssessmentSummary {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    pub score: i64,
    pub interpretation: String,
    pub created_at: jiff::Timestamp,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub assessment: AssessmentSummary,
}

pub async fn submit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(kind): Path<String>,
    Json(body): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let (kind, instrument) = resolve(&kind)?;

    // Grades or rejects; nothing is persisted on a validation failure.
    let summary = instrument.score(&body.answers)?;

    let assessment = state
        .assessments
        .create(
            auth.user_id,
            kind,
            &body.answers,
            summary.score,
            &summary.interpretation,
        )
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        kind = kind.as_str(),
        score = summary.score,
        "assessment submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "测评完成".to_string(),
            assessment: AssessmentSummary {
                id: assessment.id,
                kind: assessment.kind,
                score: assessment.score,
                interpretation: assessment.interpretation,
                created_at: assessment.created_at,
            },
        }),
    ))
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub assessments: Vec<Assessment>,
}

pub async fn history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(kind): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let (kind, _) = resolve(&kind)?;
    let assessments = state.assessments.list_recent(auth.user_id, kind).await?;
    Ok(Json(HistoryResponse { assessments }))
}

#[derive(Serialize)]
pub struct AssessmentResponse {
    pub assessment: Assessment,
}

pub async fn get_one(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let (kind, _) = resolve(&kind)?;

    let assessment = state
        .assessments
        .get(auth.user_id, kind, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("测评结果不存在".to_string()))?;

    Ok(Json(AssessmentResponse { assessment }))
}
