use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A completed screening questionnaire. Immutable once created: the score is
/// the sum of the answer values and the interpretation is a deterministic
/// function of (kind, score).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    pub answers: Vec<AnswerEntry>,
    pub score: i64,
    pub interpretation: String,
    pub created_at: jiff::Timestamp,
}

/// One answered item: the question index and the selected option value (0–3).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerEntry {
    #[serde(rename = "questionId")]
    pub question_id: i64,
    pub value: i64,
}

/// Supported questionnaire types. Only PHQ-9 and GAD-7 ship with scoring
/// rules; the others are reserved identifiers from the product roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssessmentKind {
    Phq9,
    Gad7,
    Pss,
    Big5,
}

impl AssessmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentKind::Phq9 => "phq9",
            AssessmentKind::Gad7 => "gad7",
            AssessmentKind::Pss => "pss",
            AssessmentKind::Big5 => "big5",
        }
    }
}

impl std::str::FromStr for AssessmentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phq9" => Ok(AssessmentKind::Phq9),
            "gad7" => Ok(AssessmentKind::Gad7),
            "pss" => Ok(AssessmentKind::Pss),
            "big5" => Ok(AssessmentKind::Big5),
            other => Err(CoreError::UnknownAssessmentKind(other.to_string())),
        }
    }
}
