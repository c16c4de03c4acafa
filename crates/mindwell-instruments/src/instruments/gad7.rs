use mindwell_core::models::assessment::AssessmentKind;

use crate::scoring::{Question, SeverityBand};
use crate::Instrument;

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items scored 0–3 each. Total 0–21.
pub struct Gad7;

impl Instrument for Gad7 {
    fn kind(&self) -> AssessmentKind {
        AssessmentKind::Gad7
    }

    fn name(&self) -> &str {
        "GAD-7 焦虑筛查量表"
    }

    fn description(&self) -> &str {
        "过去两周内，以下症状出现的频率"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            [
                "感到紧张、焦虑或急切",
                "不能停止或控制担忧",
                "对各种事情担忧过多",
                "很难放松",
                "烦躁不安",
                "容易生气或烦躁",
                "感到害怕好像有可怕的事情要发生",
            ]
            .iter()
            .enumerate()
            .map(|(i, text)| Question {
                id: i as i64,
                text: text.to_string(),
            })
            .collect()
        });
        &QUESTIONS
    }

    fn bands(&self) -> &[SeverityBand] {
        static BANDS: std::sync::LazyLock<Vec<SeverityBand>> = std::sync::LazyLock::new(|| {
            [
                (0, 4, "无焦虑症状"),
                (5, 9, "轻度焦虑症状"),
                (10, 14, "中度焦虑症状"),
                (15, 21, "重度焦虑症状"),
            ]
            .iter()
            .map(|(min, max, label)| SeverityBand {
                min: *min,
                max: *max,
                label: label.to_string(),
            })
            .collect()
        });
        &BANDS
    }
}
