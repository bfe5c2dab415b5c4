use super::common::*;
use crate::workflows::survey::domain::QuestionKind;
use crate::workflows::survey::routing::compute_score;

#[test]
fn sums_points_across_single_and_multi_choice() {
    let score = compute_score(&selections(&["budget-high", "sms", "webinar"]), &questions());

    assert_eq!(score, 8 + 3 + 4);
}

#[test]
fn negative_points_pull_the_total_down() {
    let score = compute_score(&selections(&["budget-low", "email"]), &questions());

    assert_eq!(score, -4);
}

#[test]
fn disjoint_selections_add_linearly() {
    let questions = questions();
    let left = ["budget-mid", "email"];
    let right = ["sms", "webinar"];
    let union: Vec<&str> = left.iter().chain(right.iter()).copied().collect();

    assert_eq!(
        compute_score(&selections(&union), &questions),
        compute_score(&selections(&left), &questions)
            + compute_score(&selections(&right), &questions)
    );
}

#[test]
fn ignores_ids_outside_choice_questions() {
    let questions = questions();
    let baseline = compute_score(&selections(&["budget-mid"]), &questions);

    let with_strays = compute_score(
        &selections(&["budget-mid", "comments", "seats", "deleted-option"]),
        &questions,
    );

    assert_eq!(baseline, with_strays);
}

#[test]
fn open_questions_never_contribute() {
    let questions = vec![
        open_question("comments", QuestionKind::FreeText),
        open_question("seats", QuestionKind::Numeric),
    ];

    assert_eq!(compute_score(&selections(&["comments", "seats"]), &questions), 0);
}

#[test]
fn empty_inputs_score_zero() {
    assert_eq!(compute_score(&selections(&[]), &questions()), 0);
    assert_eq!(compute_score(&selections(&["budget-high"]), &[]), 0);
}

#[test]
fn saturates_at_the_integer_bounds() {
    let questions = vec![
        multi_choice("huge", &[("a", i64::MAX), ("b", 1)]),
        multi_choice("tiny", &[("c", i64::MIN), ("d", -1)]),
    ];

    assert_eq!(compute_score(&selections(&["a", "b"]), &questions), i64::MAX);
    assert_eq!(compute_score(&selections(&["c", "d"]), &questions), i64::MIN);
}
