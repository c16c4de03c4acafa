//! mindwell-instruments
//!
//! Screening instrument definitions and scoring. Pure data and pure
//! functions, no I/O. Defines the question banks and severity bands for
//! each supported instrument; the band table here is the single source of
//! every user-facing interpretation string.

pub mod error;
pub mod instruments;
pub mod scoring;

use mindwell_core::models::assessment::{AnswerEntry, AssessmentKind};
use scoring::{AnswerOption, Question, ScoreSummary, SeverityBand, ValidationError};

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Which questionnaire this is (e.g. phq9, gad7).
    fn kind(&self) -> AssessmentKind;

    /// Human-readable name (e.g. "PHQ-9 抑郁筛查量表").
    fn name(&self) -> &str;

    /// Instruction line shown above the questions.
    fn description(&self) -> &str;

    /// The fixed question bank.
    fn questions(&self) -> &[Question];

    /// The fixed answer options, shared by every question.
    fn options(&self) -> &[AnswerOption] {
        scoring::frequency_options()
    }

    /// Severity bands, inclusive on both ends, contiguous from 0 to the
    /// maximum score.
    fn bands(&self) -> &[SeverityBand];

    /// Maximum attainable total score.
    fn max_score(&self) -> i64 {
        self.questions().len() as i64 * 3
    }

    /// Validate a completed answer set: the count must match the question
    /// bank and every value must be within [0, 3].
    fn validate(&self, answers: &[AnswerEntry]) -> Result<(), ValidationError> {
        let expected = self.questions().len();
        if answers.len() != expected {
            return Err(ValidationError {
                question_id: None,
                value: None,
                message: format!(
                    "{}: expected {} answers, got {}",
                    self.kind().as_str(),
                    expected,
                    answers.len()
                ),
            });
        }
        for entry in answers {
            if !(0..=3).contains(&entry.value) {
                return Err(ValidationError {
                    question_id: Some(entry.question_id),
                    value: Some(entry.value),
                    message: format!(
                        "{}: answer {} for question {} is outside [0, 3]",
                        self.kind().as_str(),
                        entry.value,
                        entry.question_id
                    ),
                });
            }
        }
        Ok(())
    }

    /// Grade a completed answer set. The score is the arithmetic sum of the
    /// answer values; the interpretation is the label of the band containing
    /// the score. No partial result is produced on invalid input.
    fn score(&self, answers: &[AnswerEntry]) -> Result<ScoreSummary, ValidationError> {
        self.validate(answers)?;

        let score: i64 = answers.iter().map(|a| a.value).sum();

        let band = self
            .bands()
            .iter()
            .find(|b| b.contains(score))
            .ok_or_else(|| ValidationError {
                question_id: None,
                value: Some(score),
                message: format!(
                    "{}: score {} is not covered by any severity band",
                    self.kind().as_str(),
                    score
                ),
            })?;

        Ok(ScoreSummary {
            score,
            interpretation: band.label.clone(),
        })
    }
}

/// Return all instruments that ship with scoring rules.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
    ]
}

/// Look up an instrument by kind. `None` for kinds without scoring rules
/// (pss, big5).
pub fn get_instrument(kind: AssessmentKind) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.kind() == kind)
}
