use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{Selections, SurveyDefinition, SurveyId};
use super::intake::{DefinitionViolation, SurveyGuard};
use super::repository::{RepositoryError, SurveyRecord, SurveyRepository};
use super::routing::{RoutingEngine, RoutingOutcome};
use super::validation::ValidationReport;

/// Service composing the intake guard, the survey repository, and the routing engine.
pub struct SurveyRoutingService<R> {
    guard: Arc<SurveyGuard>,
    repository: Arc<R>,
}

static SURVEY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_survey_id() -> SurveyId {
    let id = SURVEY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SurveyId(format!("survey-{id:06}"))
}

/// Result of routing a survey that was never registered.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewOutcome {
    pub outcome: RoutingOutcome,
    pub report: ValidationReport,
}

impl<R> SurveyRoutingService<R>
where
    R: SurveyRepository + 'static,
{
    pub fn new(repository: Arc<R>, guard: SurveyGuard) -> Self {
        Self {
            guard: Arc::new(guard),
            repository,
        }
    }

    /// Validate and persist a survey definition under a freshly assigned id.
    pub fn register(
        &self,
        definition: SurveyDefinition,
    ) -> Result<SurveyRecord, SurveyServiceError> {
        let definition = self.guard.admit(definition)?;
        let record = SurveyRecord {
            survey_id: next_survey_id(),
            definition,
            registered_at: Utc::now(),
        };

        let report = record.report();
        if !report.is_clean() {
            warn!(
                survey = %record.survey_id,
                warnings = report.warning_count(),
                "survey registered with configuration warnings"
            );
        }

        let stored = self.repository.insert(record)?;
        info!(
            survey = %stored.survey_id,
            questions = stored.definition.questions.len(),
            paths = stored.definition.paths.len(),
            "survey registered"
        );
        Ok(stored)
    }

    pub fn get(&self, survey_id: &SurveyId) -> Result<SurveyRecord, SurveyServiceError> {
        let record = self
            .repository
            .fetch(survey_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<SurveyRecord>, SurveyServiceError> {
        Ok(self.repository.list()?)
    }

    /// Route a respondent's selections through a registered survey.
    pub fn route(
        &self,
        survey_id: &SurveyId,
        selections: &Selections,
    ) -> Result<RoutingOutcome, SurveyServiceError> {
        let record = self.get(survey_id)?;
        let engine = RoutingEngine::new(record.definition);
        let outcome = engine.route(selections).to_outcome();

        info!(
            survey = %survey_id,
            reason = outcome.reason.label(),
            path = ?outcome.path_id.as_ref().map(|path| &path.0),
            "survey response routed"
        );
        Ok(outcome)
    }

    pub fn diagnostics(
        &self,
        survey_id: &SurveyId,
    ) -> Result<ValidationReport, SurveyServiceError> {
        Ok(self.get(survey_id)?.report())
    }

    /// Route against an unsaved definition, e.g. while a path is being edited.
    pub fn preview(
        &self,
        definition: SurveyDefinition,
        selections: &Selections,
    ) -> Result<PreviewOutcome, SurveyServiceError> {
        let definition = self.guard.admit(definition)?;
        let report = ValidationReport::build(&definition.paths, &definition.questions);
        let engine = RoutingEngine::new(definition);
        let outcome = engine.route(selections).to_outcome();
        Ok(PreviewOutcome { outcome, report })
    }
}

/// Error raised by the survey routing service.
#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error(transparent)]
    Definition(#[from] DefinitionViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
