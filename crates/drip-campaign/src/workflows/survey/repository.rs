use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{SurveyDefinition, SurveyId};
use super::validation::ValidationReport;

/// Registered survey plus the bookkeeping the service needs to serve it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub survey_id: SurveyId,
    pub definition: SurveyDefinition,
    pub registered_at: DateTime<Utc>,
}

impl SurveyRecord {
    pub fn report(&self) -> ValidationReport {
        ValidationReport::build(&self.definition.paths, &self.definition.questions)
    }

    pub fn summary_view(&self) -> SurveySummaryView {
        SurveySummaryView {
            survey_id: self.survey_id.clone(),
            title: self.definition.title.clone(),
            question_count: self.definition.questions.len(),
            path_count: self.definition.paths.len(),
            warning_count: self.report().warning_count(),
            registered_at: self.registered_at,
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait SurveyRepository: Send + Sync {
    fn insert(&self, record: SurveyRecord) -> Result<SurveyRecord, RepositoryError>;
    fn fetch(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<SurveyRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact view returned by listing and registration endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummaryView {
    pub survey_id: SurveyId,
    pub title: String,
    pub question_count: usize,
    pub path_count: usize,
    pub warning_count: usize,
    pub registered_at: DateTime<Utc>,
}
