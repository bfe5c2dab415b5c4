use super::super::domain::{Question, Selections};

/// Sum the points of every selected option on choice questions.
///
/// Free-text and numeric questions own no options, so ids that do not belong to a
/// choice question never affect the total. The sum saturates at the `i64` bounds.
pub fn compute_score(selections: &Selections, questions: &[Question]) -> i64 {
    questions
        .iter()
        .filter(|question| question.is_scoreable())
        .flat_map(|question| question.options())
        .filter(|option| selections.contains(&option.id))
        .map(|option| option.points)
        .fold(0i64, |total, points| total.saturating_add(points))
}
