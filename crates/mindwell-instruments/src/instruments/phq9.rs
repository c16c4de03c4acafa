use mindwell_core::models::assessment::AssessmentKind;

use crate::scoring::{Question, SeverityBand};
use crate::Instrument;

/// PHQ-9: Patient Health Questionnaire, depression module.
/// 9 items scored 0–3 each. Total 0–27.
pub struct Phq9;

impl Instrument for Phq9 {
    fn kind(&self) -> AssessmentKind {
        AssessmentKind::Phq9
    }

    fn name(&self) -> &str {
        "PHQ-9 抑郁筛查量表"
    }

    fn description(&self) -> &str {
        "过去两周内，以下症状出现的频率"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            [
                "做事时提不起劲或没有兴趣",
                "感到心情低落、沮丧或绝望",
                "入睡困难、睡不安稳或睡眠过多",
                "感觉疲倦或没有活力",
                "食欲不振或吃太多",
                "觉得自己很糟或是个失败者",
                "注意力难以集中",
                "动作或说话变慢或坐立不安",
                "有不如死掉或用某种方式伤害自己的念头",
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
                (0, 4, "无抑郁症状"),
                (5, 9, "轻度抑郁症状"),
                (10, 14, "中度抑郁症状"),
                (15, 19, "中重度抑郁症状"),
                (20, 27, "重度抑郁症状"),
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
