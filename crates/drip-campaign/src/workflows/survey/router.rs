use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{OptionId, Selections, SurveyDefinition, SurveyId};
use super::repository::{RepositoryError, SurveyRepository, SurveySummaryView};
use super::service::{SurveyRoutingService, SurveyServiceError};

/// Body accepted by the routing endpoint.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub selections: Vec<OptionId>,
}

/// Body accepted by the preview endpoint.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub survey: SurveyDefinition,
    #[serde(default)]
    pub selections: Vec<OptionId>,
}

/// Router builder exposing survey registration, routing, and diagnostics.
pub fn survey_router<R>(service: Arc<SurveyRoutingService<R>>) -> Router
where
    R: SurveyRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/surveys",
            post(register_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/surveys/:survey_id", get(summary_handler::<R>))
        .route("/api/v1/surveys/:survey_id/route", post(route_handler::<R>))
        .route(
            "/api/v1/surveys/:survey_id/warnings",
            get(warnings_handler::<R>),
        )
        .route("/api/v1/routing/preview", post(preview_handler::<R>))
        .with_state(service)
}

fn error_response(error: SurveyServiceError) -> Response {
    let status = match &error {
        SurveyServiceError::Definition(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SurveyServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SurveyServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SurveyServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<SurveyRoutingService<R>>>,
    axum::Json(definition): axum::Json<SurveyDefinition>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.register(definition) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.summary_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<SurveyRoutingService<R>>>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.list() {
        Ok(records) => {
            let views: Vec<SurveySummaryView> =
                records.iter().map(|record| record.summary_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<SurveyRoutingService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.get(&SurveyId(survey_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.summary_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn route_handler<R>(
    State(service): State<Arc<SurveyRoutingService<R>>>,
    Path(survey_id): Path<String>,
    axum::Json(request): axum::Json<RouteRequest>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let selections: Selections = request.selections.into_iter().collect();
    match service.route(&SurveyId(survey_id), &selections) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn warnings_handler<R>(
    State(service): State<Arc<SurveyRoutingService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.diagnostics(&SurveyId(survey_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<SurveyRoutingService<R>>>,
    axum::Json(request): axum::Json<PreviewRequest>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let selections: Selections = request.selections.into_iter().collect();
    match service.preview(request.survey, &selections) {
        Ok(preview) => (StatusCode::OK, axum::Json(preview)).into_response(),
        Err(error) => error_response(error),
    }
}
