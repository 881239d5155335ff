pub mod drivers;
pub mod jobs;
pub mod legacy;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::models::job::Job;
use crate::state::AppState;

pub const LIVENESS_MESSAGE: &str = "Last-Mile Logistics API is live!";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(jobs::router())
        .merge(legacy::router())
        .merge(drivers::router())
        .route("/", get(home).fallback(method_not_allowed))
        .route("/health", get(health).fallback(method_not_allowed))
        .route("/metrics", get(metrics).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors()),
        )
}

/// Any origin, with credentials. A wildcard origin cannot be combined with
/// credentials, so the request's own origin, method and headers are echoed.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub(crate) fn outcome(result: &Result<Job, AppError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(AppError::JobNotFound(_)) => "not_found",
        Err(AppError::JobUnavailable(_)) => "unavailable",
        Err(_) => "error",
    }
}

async fn not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// Fallback for a known path hit with a method it does not serve.
pub(crate) async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

async fn home() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: LIVENESS_MESSAGE,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    jobs: usize,
    drivers: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        jobs: state.jobs.len(),
        drivers: state.drivers.len(),
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
