use mindwell_core::models::assessment::{AnswerEntry, AssessmentKind};
use mindwell_instruments::instruments::gad7::Gad7;
use mindwell_instruments::instruments::phq9::Phq9;
use mindwell_instruments::{all_instruments, get_instrument, Instrument};

fn answers(values: &[i64]) -> Vec<AnswerEntry> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| AnswerEntry {
            question_id: i as i64,
            value: *v,
        })
        .collect()
}

#[test]
fn phq9_score_is_sum_of_answer_values() {
    let summary = Phq9.score(&answers(&[1, 0, 2, 3, 1, 0, 2, 1, 2])).unwrap();
    assert_eq!(summary.score, 12);
    assert_eq!(summary.interpretation, "中度抑郁症状");
}

#[test]
fn phq9_interpretation_at_every_band_boundary() {
    let cases = [
        (0, "无抑郁症状"),
        (4, "无抑郁症状"),
        (5, "轻度抑郁症状"),
        (9, "轻度抑郁症状"),
        (10, "中度抑郁症状"),
        (14, "中度抑郁症状"),
        (15, "中重度抑郁症状"),
        (19, "中重度抑郁症状"),
        (20, "重度抑郁症状"),
        (27, "重度抑郁症状"),
    ];

    for (target, expected) in cases {
        // Distribute the target score over 9 items, each capped at 3.
        let mut values = [0i64; 9];
        let mut remaining = target;
        for v in values.iter_mut() {
            let take = remaining.min(3);
            *v = take;
            remaining -= take;
        }
        assert_eq!(remaining, 0, "score {target} not representable");

        let summary = Phq9.score(&answers(&values)).unwrap();
        assert_eq!(summary.score, target);
        assert_eq!(
            summary.interpretation, expected,
            "wrong band for score {target}"
        );
    }
}

#[test]
fn gad7_interpretation_at_every_band_boundary() {
    let cases = [
        (0, "无焦虑症状"),
        (4, "无焦虑症状"),
        (5, "轻度焦虑症状"),
        (9, "轻度焦虑症状"),
        (10, "中度焦虑症状"),
        (14, "中度焦虑症状"),
        (15, "重度焦虑症状"),
        (21, "重度焦虑症状"),
    ];

    for (target, expected) in cases {
        let mut values = [0i64; 7];
        let mut remaining = target;
        for v in values.iter_mut() {
            let take = remaining.min(3);
            *v = take;
            remaining -= take;
        }
        assert_eq!(remaining, 0, "score {target} not representable");

        let summary = Gad7.score(&answers(&values)).unwrap();
        assert_eq!(summary.score, target);
        assert_eq!(
            summary.interpretation, expected,
            "wrong band for score {target}"
        );
    }
}

#[test]
fn bands_are_contiguous_and_cover_the_full_range() {
    for instrument in all_instruments() {
        let bands = instrument.bands();
        assert_eq!(bands[0].min, 0, "{} must start at 0", instrument.name());
        assert_eq!(
            bands.last().unwrap().max,
            instrument.max_score(),
            "{} must end at its max score",
            instrument.name()
        );
        for pair in bands.windows(2) {
            assert_eq!(
                pair[1].min,
                pair[0].max + 1,
                "{}: band {} and {} must be adjacent",
                instrument.name(),
                pair[0].label,
                pair[1].label
            );
        }
    }
}

#[test]
fn wrong_answer_count_is_rejected() {
    let err = Phq9.score(&answers(&[1, 2, 3])).unwrap_err();
    assert!(err.message.contains("expected 9 answers"));

    let err = Gad7.score(&answers(&[0; 9])).unwrap_err();
    assert!(err.message.contains("expected 7 answers"));
}

#[test]
fn out_of_range_answer_value_is_rejected() {
    let err = Phq9
        .score(&answers(&[0, 1, 2, 4, 0, 0, 0, 0, 0]))
        .unwrap_err();
    assert_eq!(err.question_id, Some(3));
    assert_eq!(err.value, Some(4));

    let err = Gad7.score(&answers(&[0, 0, -1, 0, 0, 0, 0])).unwrap_err();
    assert_eq!(err.value, Some(-1));
}

#[test]
fn phq9_extremes() {
    let max = Phq9.score(&answers(&[3; 9])).unwrap();
    assert_eq!(max.score, 27);
    assert_eq!(max.interpretation, "重度抑郁症状");

    let min = Phq9.score(&answers(&[0; 9])).unwrap();
    assert_eq!(min.score, 0);
    assert_eq!(min.interpretation, "无抑郁症状");
}

#[test]
fn unimplemented_kinds_have_no_instrument() {
    assert!(get_instrument(AssessmentKind::Phq9).is_some());
    assert!(get_instrument(AssessmentKind::Gad7).is_some());
    assert!(get_instrument(AssessmentKind::Pss).is_none());
    assert!(get_instrument(AssessmentKind::Big5).is_none());
}

#[test]
fn question_banks_have_expected_sizes_and_options() {
    let phq9 = Phq9;
    assert_eq!(phq9.questions().len(), 9);
    assert_eq!(phq9.max_score(), 27);

    let gad7 = Gad7;
    assert_eq!(gad7.questions().len(), 7);
    assert_eq!(gad7.max_score(), 21);

    for instrument in all_instruments() {
        let options = instrument.options();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].value, 0);
        assert_eq!(options[3].value, 3);
    }
}
