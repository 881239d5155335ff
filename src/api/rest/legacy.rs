//! Older assign/complete routes, still used by existing clients.
//!
//! Unlike `/jobs/:job_id/accept`, an unknown job here is answered with
//! `200 OK` and an `{"error": ...}` body rather than an error status.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::api::rest::{method_not_allowed, outcome};
use crate::error::AppError;
use crate::models::job::Job;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/assign/:job_id/:driver_id",
            post(assign_driver).fallback(method_not_allowed),
        )
        .route(
            "/complete/:job_id",
            post(complete_job).fallback(method_not_allowed),
        )
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LegacyResponse {
    Done { message: &'static str, job: Job },
    Failed { error: &'static str },
}

impl LegacyResponse {
    fn from_result(
        message: &'static str,
        result: Result<Job, AppError>,
    ) -> Result<Self, AppError> {
        match result {
            Ok(job) => Ok(LegacyResponse::Done { message, job }),
            Err(AppError::JobNotFound(_)) => Ok(LegacyResponse::Failed {
                error: "Job not found",
            }),
            Err(err) => Err(err),
        }
    }
}

async fn assign_driver(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<LegacyResponse>, AppError> {
    let Path((job_id, driver_id)) = ids?;

    let result = state.jobs.assign(job_id, driver_id);
    state.metrics.record_transition("assign", outcome(&result));

    LegacyResponse::from_result("Driver assigned", result).map(Json)
}

async fn complete_job(
    State(state): State<Arc<AppState>>,
    job_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<LegacyResponse>, AppError> {
    let Path(job_id) = job_id?;

    let result = state.jobs.complete(job_id);
    state.metrics.record_transition("complete", outcome(&result));

    LegacyResponse::from_result("Job completed", result).map(Json)
}
