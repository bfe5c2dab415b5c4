use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::IntakeLimits;
use crate::workflows::survey::domain::{
    AdvancedRules, OptionId, Question, QuestionId, QuestionKind, ResponseOption, ResponsePath,
    Selections, SurveyDefinition, SurveyId,
};
use crate::workflows::survey::intake::SurveyGuard;
use crate::workflows::survey::repository::{RepositoryError, SurveyRecord, SurveyRepository};
use crate::workflows::survey::{survey_router, SurveyRoutingService};

fn options(entries: &[(&str, i64)]) -> Vec<ResponseOption> {
    entries
        .iter()
        .map(|(id, points)| ResponseOption {
            id: OptionId::from(*id),
            label: id.to_uppercase(),
            points: *points,
            allows_text: false,
        })
        .collect()
}

pub(super) fn single_choice(id: &str, entries: &[(&str, i64)]) -> Question {
    Question {
        id: QuestionId::from(id),
        prompt: format!("Pick one for {id}"),
        kind: QuestionKind::SingleChoice {
            options: options(entries),
        },
    }
}

pub(super) fn multi_choice(id: &str, entries: &[(&str, i64)]) -> Question {
    Question {
        id: QuestionId::from(id),
        prompt: format!("Pick any for {id}"),
        kind: QuestionKind::MultiChoice {
            options: options(entries),
        },
    }
}

pub(super) fn open_question(id: &str, kind: QuestionKind) -> Question {
    Question {
        id: QuestionId::from(id),
        prompt: format!("Tell us about {id}"),
        kind,
    }
}

/// Budget (single), channels (multi), comments (free text), seats (numeric).
pub(super) fn questions() -> Vec<Question> {
    vec![
        single_choice("budget", &[("budget-low", -5), ("budget-mid", 2), ("budget-high", 8)]),
        multi_choice("channels", &[("email", 1), ("sms", 3), ("webinar", 4)]),
        open_question("comments", QuestionKind::FreeText),
        open_question("seats", QuestionKind::Numeric),
    ]
}

pub(super) fn selections(ids: &[&str]) -> Selections {
    ids.iter().copied().collect()
}

pub(super) fn ids(values: &[&str]) -> Vec<OptionId> {
    values.iter().map(|value| OptionId::from(*value)).collect()
}

pub(super) fn threshold_path(id: &str, min: Option<i64>, max: Option<i64>) -> ResponsePath {
    let mut path = ResponsePath::new(id, format!("{id} threshold"));
    path.score_min = min;
    path.score_max = max;
    path
}

pub(super) fn mapped_path(id: &str, mapped: &[&str]) -> ResponsePath {
    let mut path = ResponsePath::new(id, format!("{id} mapping"));
    path.mapped_options = ids(mapped);
    path
}

pub(super) fn rules(all: &[&str], any: &[&str], none: &[&str]) -> AdvancedRules {
    AdvancedRules {
        enabled: true,
        require_all: ids(all),
        require_any: ids(any),
        require_none: ids(none),
    }
}

pub(super) fn advanced_path(id: &str, all: &[&str], any: &[&str], none: &[&str]) -> ResponsePath {
    let mut path = ResponsePath::new(id, format!("{id} rules"));
    path.advanced_rules = Some(rules(all, any, none));
    path
}

pub(super) fn definition() -> SurveyDefinition {
    SurveyDefinition {
        title: "Lead qualification".to_string(),
        questions: questions(),
        paths: vec![
            advanced_path("enterprise", &["budget-high", "webinar"], &[], &[]),
            threshold_path("warm", Some(4), None),
            mapped_path("nurture", &["budget-low"]),
        ],
    }
}

pub(super) fn guard() -> SurveyGuard {
    SurveyGuard::with_limits(IntakeLimits {
        max_questions: 10,
        max_paths: 5,
        max_options_per_question: 4,
    })
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<SurveyId, SurveyRecord>>>,
}

impl SurveyRepository for MemoryRepository {
    fn insert(&self, record: SurveyRecord) -> Result<SurveyRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.survey_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.survey_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<SurveyRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct ConflictRepository;

impl SurveyRepository for ConflictRepository {
    fn insert(&self, _record: SurveyRecord) -> Result<SurveyRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<SurveyRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl SurveyRepository for UnavailableRepository {
    fn insert(&self, _record: SurveyRecord) -> Result<SurveyRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<SurveyRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (SurveyRoutingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = SurveyRoutingService::new(repository.clone(), guard());
    (service, repository)
}

pub(super) fn router_with_service(
    service: SurveyRoutingService<MemoryRepository>,
) -> axum::Router {
    survey_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
