use super::super::domain::{Question, ResponsePath, Selections};
use super::rules::{matches_advanced_rules, matches_score_threshold, matches_simple_mapping};
use super::scoring::compute_score;
use super::{RouteDecision, RoutingReason};

/// Pick the first path, in list order, that satisfies its own applicable tier.
///
/// Tiers are checked per path (advanced rules, then score threshold, then simple
/// mapping) inside a single scan. A path with advanced rules enabled is decided by
/// those rules alone: when they fail the path is skipped even if its threshold or
/// mapping would match.
pub fn resolve_path<'a>(
    selections: &Selections,
    paths: &'a [ResponsePath],
    questions: &[Question],
) -> RouteDecision<'a> {
    if selections.is_empty() || paths.is_empty() {
        return RouteDecision::unmatched(None);
    }

    let score = compute_score(selections, questions);

    for path in paths {
        if path.advanced_rules_enabled() {
            if matches_advanced_rules(selections, path.advanced_rules.as_ref()) {
                return RouteDecision::matched(path, RoutingReason::AdvancedRules, score);
            }
            continue;
        }

        if matches_score_threshold(score, path) {
            return RouteDecision::matched(path, RoutingReason::ScoreThreshold, score);
        }

        if matches_simple_mapping(selections, path) {
            return RouteDecision::matched(path, RoutingReason::SimpleMapping, score);
        }
    }

    RouteDecision::unmatched(Some(score))
}
