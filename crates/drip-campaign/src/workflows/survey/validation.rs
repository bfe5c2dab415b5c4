//! Advisory checks over path configurations. Nothing here blocks routing.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::domain::{
    AdvancedRules, OptionId, PathId, Question, QuestionId, QuestionKind, ResponsePath,
};

/// Warnings keyed by path; paths without warnings are absent.
pub type PathWarnings = BTreeMap<PathId, Vec<String>>;

pub const NO_ROUTING_LOGIC: &str = "Path has no routing logic configured.";
pub const MAPPING_SHADOWED: &str =
    "Advanced rules take priority; simple option mappings on this path will never be consulted.";
pub const THRESHOLD_SHADOWED: &str =
    "Advanced rules take priority; the score threshold on this path will never be consulted.";

/// Warnings and dangling references for a whole survey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub warnings: PathWarnings,
    pub dangling_references: PathWarnings,
}

impl ValidationReport {
    pub fn build(paths: &[ResponsePath], questions: &[Question]) -> Self {
        Self {
            warnings: validate_paths(paths, questions),
            dangling_references: dangling_references(paths, questions),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.dangling_references.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum::<usize>()
            + self.dangling_references.values().map(Vec::len).sum::<usize>()
    }
}

struct OptionOwner<'a> {
    question: &'a QuestionId,
    single_choice: bool,
}

type OptionOwners<'a> = HashMap<&'a OptionId, Vec<OptionOwner<'a>>>;

/// Every question owning each option id; ids may repeat across questions.
fn option_owners(questions: &[Question]) -> OptionOwners<'_> {
    let mut owners: OptionOwners<'_> = HashMap::new();
    for question in questions {
        for option in question.options() {
            owners.entry(&option.id).or_default().push(OptionOwner {
                question: &question.id,
                single_choice: question.is_single_choice(),
            });
        }
    }
    owners
}

/// Run every configuration check against each path independently.
pub fn validate_paths(paths: &[ResponsePath], questions: &[Question]) -> PathWarnings {
    let owners = option_owners(questions);
    let mut report = PathWarnings::new();

    for path in paths {
        let warnings = path_warnings(path, &owners);
        if !warnings.is_empty() {
            report.insert(path.id.clone(), warnings);
        }
    }

    report
}

fn path_warnings(path: &ResponsePath, owners: &OptionOwners<'_>) -> Vec<String> {
    let mut warnings = Vec::new();
    let active_rules = path
        .advanced_rules
        .as_ref()
        .map(AdvancedRules::is_active)
        .unwrap_or(false);

    if !path.has_score_threshold() && !active_rules && path.mapped_options.is_empty() {
        warnings.push(NO_ROUTING_LOGIC.to_string());
    }

    if active_rules && !path.mapped_options.is_empty() {
        warnings.push(MAPPING_SHADOWED.to_string());
    }

    if active_rules && path.has_score_threshold() {
        warnings.push(THRESHOLD_SHADOWED.to_string());
    }

    if let (Some(min), Some(max)) = (path.score_min, path.score_max) {
        if min > max {
            warnings.push(format!(
                "Invalid score range: minimum {min} is greater than maximum {max}, so no score can match."
            ));
        }
    }

    if let Some(rules) = &path.advanced_rules {
        warnings.extend(exclusive_requirements(rules, owners));
        warnings.extend(contradictions(rules));
    }

    warnings
}

/// AND members that share a single-choice question can never all be selected.
fn exclusive_requirements(
    rules: &AdvancedRules,
    owners: &OptionOwners<'_>,
) -> Vec<String> {
    if rules.require_all.len() < 2 {
        return Vec::new();
    }

    let mut by_question: BTreeMap<&QuestionId, BTreeSet<&OptionId>> = BTreeMap::new();
    for option in &rules.require_all {
        let single_choice_owners = owners
            .get(option)
            .into_iter()
            .flatten()
            .filter(|owner| owner.single_choice);
        for owner in single_choice_owners {
            by_question.entry(owner.question).or_default().insert(option);
        }
    }

    by_question
        .into_iter()
        .filter(|(_, options)| options.len() > 1)
        .map(|(question, options)| {
            format!(
                "Impossible combination: required options {} all answer single-choice question '{}', so this AND condition can never be satisfied.",
                join_ids(options.into_iter()),
                question.0
            )
        })
        .collect()
}

fn contradictions(rules: &AdvancedRules) -> Vec<String> {
    let excluded: BTreeSet<&OptionId> = rules.require_none.iter().collect();
    if excluded.is_empty() {
        return Vec::new();
    }

    let mut warnings = Vec::new();

    let clashing: BTreeSet<&OptionId> = rules
        .require_all
        .iter()
        .filter(|option| excluded.contains(option))
        .collect();
    if !clashing.is_empty() {
        warnings.push(format!(
            "Contradictory rules: {} is both required and excluded.",
            join_ids(clashing.into_iter())
        ));
    }

    if !rules.require_any.is_empty()
        && rules
            .require_any
            .iter()
            .all(|option| excluded.contains(option))
    {
        warnings.push(
            "Contradictory rules: every 'any of' option is also excluded, so the OR condition can never be satisfied."
                .to_string(),
        );
    }

    warnings
}

/// Report option and question references that do not resolve against the survey.
pub fn dangling_references(paths: &[ResponsePath], questions: &[Question]) -> PathWarnings {
    let owners = option_owners(questions);
    let numeric: BTreeSet<&QuestionId> = questions
        .iter()
        .filter(|question| matches!(question.kind, QuestionKind::Numeric))
        .map(|question| &question.id)
        .collect();

    let mut report = PathWarnings::new();

    for path in paths {
        let mut referenced: Vec<&OptionId> = path.mapped_options.iter().collect();
        if let Some(rules) = &path.advanced_rules {
            referenced.extend(&rules.require_all);
            referenced.extend(&rules.require_any);
            referenced.extend(&rules.require_none);
        }

        let missing: BTreeSet<&OptionId> = referenced
            .into_iter()
            .filter(|option| !owners.contains_key(option))
            .collect();

        let mut warnings = Vec::new();
        if !missing.is_empty() {
            warnings.push(format!(
                "References unknown options: {}.",
                join_ids(missing.into_iter())
            ));
        }

        for condition in &path.range_conditions {
            if !numeric.contains(&condition.question_id) {
                warnings.push(format!(
                    "Range condition references '{}', which is not a numeric question.",
                    condition.question_id.0
                ));
            }
        }

        if !warnings.is_empty() {
            report.insert(path.id.clone(), warnings);
        }
    }

    report
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a OptionId>) -> String {
    ids.map(|id| format!("'{}'", id.0))
        .collect::<Vec<_>>()
        .join(", ")
}
