use super::super::domain::{AdvancedRules, ResponsePath, Selections};

/// Advanced boolean rules. An enabled rule set with every list empty matches.
pub fn matches_advanced_rules(selections: &Selections, rules: Option<&AdvancedRules>) -> bool {
    let Some(rules) = rules.filter(|rules| rules.enabled) else {
        return false;
    };

    if !rules
        .require_all
        .iter()
        .all(|option| selections.contains(option))
    {
        return false;
    }

    if !rules.require_any.is_empty()
        && !rules
            .require_any
            .iter()
            .any(|option| selections.contains(option))
    {
        return false;
    }

    !rules
        .require_none
        .iter()
        .any(|option| selections.contains(option))
}

/// Score bounds are inclusive; an unset bound does not constrain its side.
pub fn matches_score_threshold(score: i64, path: &ResponsePath) -> bool {
    if !path.has_score_threshold() {
        return false;
    }

    let above_min = path.score_min.map_or(true, |min| score >= min);
    let below_max = path.score_max.map_or(true, |max| score <= max);
    above_min && below_max
}

pub fn matches_simple_mapping(selections: &Selections, path: &ResponsePath) -> bool {
    path.mapped_options
        .iter()
        .any(|option| selections.contains(option))
}
