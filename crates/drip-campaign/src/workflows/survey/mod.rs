//! Survey nodes of a drip campaign: response routing, configuration diagnostics,
//! intake validation, and the service/HTTP surface that exposes them.

pub mod domain;
pub mod import;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod routing;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AdvancedRules, OptionId, PathId, Question, QuestionId, QuestionKind, RangeCondition,
    ResponseOption, ResponsePath, Selections, SurveyDefinition, SurveyId,
};
pub use import::{SurveyImportError, SurveyImporter};
pub use intake::{DefinitionViolation, SurveyGuard};
pub use repository::{RepositoryError, SurveyRecord, SurveyRepository, SurveySummaryView};
pub use router::survey_router;
pub use routing::{
    compute_score, matches_advanced_rules, matches_score_threshold, matches_simple_mapping,
    resolve_path, RouteDecision, RoutingEngine, RoutingOutcome, RoutingReason,
};
pub use service::{PreviewOutcome, SurveyRoutingService, SurveyServiceError};
pub use validation::{dangling_references, validate_paths, PathWarnings, ValidationReport};
