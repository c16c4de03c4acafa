use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// One item in a question bank.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: i64,
    pub text: String,
}

/// A selectable answer option with its score contribution.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub value: i64,
    pub label: String,
}

/// An inclusive score range mapped to a severity label. Bands for one
/// instrument are contiguous: each band's `min` is the previous band's
/// `max + 1`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeverityBand {
    pub min: i64,
    pub max: i64,
    pub label: String,
}

impl SeverityBand {
    pub fn contains(&self, score: i64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// The result of grading a completed questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreSummary {
    pub score: i64,
    pub interpretation: String,
}

/// A rejected answer set. Carries the offending question/value when the
/// failure is a single out-of-range answer.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: Option<i64>,
    pub value: Option<i64>,
    pub message: String,
}

/// The four frequency options used by both PHQ-9 and GAD-7 ("over the last
/// two weeks, how often..."), scored 0–3.
pub fn frequency_options() -> &'static [AnswerOption] {
    static OPTIONS: std::sync::LazyLock<Vec<AnswerOption>> = std::sync::LazyLock::new(|| {
        [
            (0, "完全没有"),
            (1, "几天"),
            (2, "一半以上时间"),
            (3, "几乎每天"),
        ]
        .iter()
        .map(|(value, label)| AnswerOption {
            value: *value,
            label: label.to_string(),
        })
        .collect()
    });
    &OPTIONS
}
