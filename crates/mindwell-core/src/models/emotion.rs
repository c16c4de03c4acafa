use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::mood_diary::Mood;

/// The emotion classification computed for one user message.
///
/// The neutral default (calm, 5, no keywords) is what the chat flow falls
/// back to when the classifier is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmotionSnapshot {
    pub emotion: Mood,
    pub intensity: i64,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Default for EmotionSnapshot {
    fn default() -> Self {
        Self {
            emotion: Mood::Calm,
            intensity: 5,
            keywords: Vec::new(),
        }
    }
}

impl EmotionSnapshot {
    /// Clamp intensity into [1, 10]; classifier output is not trusted.
    pub fn clamped(mut self) -> Self {
        self.intensity = self.intensity.clamp(1, 10);
        self
    }
}

/// The crisis-risk classification computed for one user message.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrisisSnapshot {
    #[serde(rename = "isCrisis")]
    pub is_crisis: bool,
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Default for CrisisSnapshot {
    fn default() -> Self {
        Self {
            is_crisis: false,
            risk_level: RiskLevel::Low,
            suggestions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}
