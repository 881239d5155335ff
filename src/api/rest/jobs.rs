use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::api::rest::{method_not_allowed, outcome};
use crate::error::AppError;
use crate::models::job::{Job, NewJob};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/jobs",
            get(list_jobs)
                .post(create_job)
                .fallback(method_not_allowed),
        )
        .route(
            "/jobs/:job_id/accept",
            post(accept_job).fallback(method_not_allowed),
        )
}

/// `driver_id` may come from the query string or a JSON body; the query wins.
#[derive(Debug, Default, Deserialize)]
pub struct AcceptJobParams {
    pub driver_id: Option<i64>,
}

async fn list_jobs(State(state): State<Arc<AppState>>) -> Json<Vec<Job>> {
    Json(state.jobs.list())
}

async fn create_job(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> Result<Json<Job>, AppError> {
    let Json(payload) = payload?;

    let job = state.jobs.create(payload);
    state.metrics.jobs_created_total.inc();

    Ok(Json(job))
}

async fn accept_job(
    State(state): State<Arc<AppState>>,
    job_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<AcceptJobParams>, QueryRejection>,
    body: Option<Json<AcceptJobParams>>,
) -> Result<Json<Job>, AppError> {
    let Path(job_id) = job_id?;
    let Query(query) = query?;
    let driver_id = query
        .driver_id
        .or_else(|| body.and_then(|Json(params)| params.driver_id));

    let result = state.jobs.accept(job_id, driver_id);
    state.metrics.record_transition("accept", outcome(&result));

    result.map(Json)
}
