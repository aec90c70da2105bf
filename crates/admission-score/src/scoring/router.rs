use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ProgramKey, SchoolRecord, StudentId};
use super::service::{SchoolRecordSource, ScoreService, ScoringError};

/// Inline scoring request carrying the record snapshot itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub record: SchoolRecord,
    pub program: ProgramKey,
}

/// Scoring request for a student whose record lives in the record source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentScoreRequest {
    pub program: ProgramKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortRankRequest {
    pub my_score: f64,
    #[serde(default)]
    pub peer_scores: Vec<f64>,
}

/// Router builder exposing the scoring engine over HTTP.
pub fn scoring_router<S>(service: Arc<ScoreService<S>>) -> Router
where
    S: SchoolRecordSource + 'static,
{
    Router::new()
        .route("/api/v1/scores", post(score_handler::<S>))
        .route(
            "/api/v1/students/:student_id/scores",
            post(student_score_handler::<S>),
        )
        .route("/api/v1/cohort/rank", post(cohort_rank_handler::<S>))
        .route("/api/v1/programs", get(programs_handler::<S>))
        .with_state(service)
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<ScoreService<S>>>,
    Json(request): Json<ScoreRequest>,
) -> Response
where
    S: SchoolRecordSource + 'static,
{
    let result = service.compute_score(&request.record, &request.program);
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(result)).into_response()
}

pub(crate) async fn student_score_handler<S>(
    State(service): State<Arc<ScoreService<S>>>,
    Path(student_id): Path<String>,
    Json(request): Json<StudentScoreRequest>,
) -> Response
where
    S: SchoolRecordSource + 'static,
{
    let student = StudentId(student_id);
    match service.score_student(&student, &request.program) {
        Ok(result) if result.success => (StatusCode::OK, Json(result)).into_response(),
        Ok(result) => (StatusCode::NOT_FOUND, Json(result)).into_response(),
        Err(error @ ScoringError::StudentNotFound(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn cohort_rank_handler<S>(
    State(service): State<Arc<ScoreService<S>>>,
    Json(request): Json<CohortRankRequest>,
) -> Response
where
    S: SchoolRecordSource + 'static,
{
    let summary = service.rank_against_cohort(request.my_score, &request.peer_scores);
    (StatusCode::OK, Json(summary)).into_response()
}

pub(crate) async fn programs_handler<S>(State(service): State<Arc<ScoreService<S>>>) -> Response
where
    S: SchoolRecordSource + 'static,
{
    let programs = service.registry().programs();
    (StatusCode::OK, Json(json!({ "programs": programs }))).into_response()
}
