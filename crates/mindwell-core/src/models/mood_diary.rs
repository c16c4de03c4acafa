use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A mood diary entry. Intensity is strictly within [1, 10].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MoodDiary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: Mood,
    pub intensity: i64,
    pub triggers: Option<Vec<String>>,
    pub notes: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// The closed set of moods a diary entry (or an emotion snapshot) can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Angry,
    #[default]
    Calm,
    Tired,
    Excited,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Angry,
        Mood::Calm,
        Mood::Tired,
        Mood::Excited,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Calm => "calm",
            Mood::Tired => "tired",
            Mood::Excited => "excited",
        }
    }

    /// Display label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "开心",
            Mood::Sad => "难过",
            Mood::Anxious => "焦虑",
            Mood::Angry => "生气",
            Mood::Calm => "平静",
            Mood::Tired => "疲惫",
            Mood::Excited => "兴奋",
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| CoreError::UnknownMood(s.to_string()))
    }
}
