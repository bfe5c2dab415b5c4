//! Survey response routing: score aggregation, per-tier rule evaluation, and path resolution.

mod resolver;
mod rules;
mod scoring;

pub use resolver::resolve_path;
pub use rules::{matches_advanced_rules, matches_score_threshold, matches_simple_mapping};
pub use scoring::compute_score;

use super::domain::{PathId, ResponsePath, Selections, SurveyDefinition};
use super::validation::{validate_paths, PathWarnings};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which tier selected the path, or `NoMatch` when none did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingReason {
    AdvancedRules,
    ScoreThreshold,
    SimpleMapping,
    NoMatch,
}

impl RoutingReason {
    pub const fn label(self) -> &'static str {
        match self {
            RoutingReason::AdvancedRules => "advanced_rules",
            RoutingReason::ScoreThreshold => "score_threshold",
            RoutingReason::SimpleMapping => "simple_mapping",
            RoutingReason::NoMatch => "no_match",
        }
    }
}

/// Borrowed resolution result. `score` is `None` only when resolution short-circuited
/// on empty selections or an empty path list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteDecision<'a> {
    pub path: Option<&'a ResponsePath>,
    pub reason: RoutingReason,
    pub score: Option<i64>,
}

impl<'a> RouteDecision<'a> {
    pub(crate) fn matched(path: &'a ResponsePath, reason: RoutingReason, score: i64) -> Self {
        Self {
            path: Some(path),
            reason,
            score: Some(score),
        }
    }

    pub(crate) fn unmatched(score: Option<i64>) -> Self {
        Self {
            path: None,
            reason: RoutingReason::NoMatch,
            score,
        }
    }

    pub fn to_outcome(&self) -> RoutingOutcome {
        RoutingOutcome {
            path_id: self.path.map(|path| path.id.clone()),
            path_label: self.path.map(|path| path.label.clone()),
            reason: self.reason,
            score: self.score,
        }
    }
}

/// Owned routing result exposed through the service and HTTP layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingOutcome {
    pub path_id: Option<PathId>,
    pub path_label: Option<String>,
    pub reason: RoutingReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

impl RoutingOutcome {
    pub fn summary(&self) -> String {
        match (&self.path_id, self.score) {
            (Some(path), Some(score)) => format!(
                "routed to {} via {} (score {score})",
                path.0,
                self.reason.label()
            ),
            (Some(path), None) => format!("routed to {} via {}", path.0, self.reason.label()),
            (None, Some(score)) => format!("no path matched (score {score})"),
            (None, None) => "no path matched".to_string(),
        }
    }
}

/// Stateless router bound to one survey definition.
pub struct RoutingEngine {
    definition: SurveyDefinition,
}

impl RoutingEngine {
    pub fn new(definition: SurveyDefinition) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &SurveyDefinition {
        &self.definition
    }

    pub fn score(&self, selections: &Selections) -> i64 {
        compute_score(selections, &self.definition.questions)
    }

    pub fn route(&self, selections: &Selections) -> RouteDecision<'_> {
        let decision = resolve_path(
            selections,
            &self.definition.paths,
            &self.definition.questions,
        );

        debug!(
            reason = decision.reason.label(),
            score = ?decision.score,
            path = ?decision.path.map(|path| &path.id.0),
            selected = selections.len(),
            "survey response resolved"
        );

        decision
    }

    pub fn warnings(&self) -> PathWarnings {
        validate_paths(&self.definition.paths, &self.definition.questions)
    }
}
