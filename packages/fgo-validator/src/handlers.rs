//! HTTP request handlers.

use crate::metrics::METRICS;
use crate::response::HealthResponse;
use crate::schemas::{FuturesValidationRequest, ParentValidationRequest, TemplateValidationRequest};
use crate::state::AppState;
use crate::Error;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use fgo_types::schema::SCHEMA_VERSION;
use fgo_types::{FuturesCreditsValidationResult, ValidationResult};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Prometheus metrics in text exposition format.
pub async fn metrics() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        METRICS.render(),
    )
}

/// Health check with RPC status.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (rpc_status, active_rpc, failovers) = match &state.rpc {
        Some(rpc) => (
            rpc.health_check().await.unwrap_or("unavailable"),
            rpc.active_url().to_string(),
            rpc.failover_count(),
        ),
        None => ("n/a", "in-process".to_string(), 0),
    };
    let status = match rpc_status {
        "unavailable" => "unavailable",
        "degraded" => "degraded",
        _ => "ok",
    };

    Json(HealthResponse {
        status,
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
        active_rpc,
        failovers,
        rpc_status,
        schema_version: SCHEMA_VERSION,
    })
}

/// Validate a parent's bill of materials.
pub async fn validate_parent(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ParentValidationRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, Error> {
    let Json(request) = accept(&state, body)?;
    METRICS.parent_validations.fetch_add(1, Ordering::Relaxed);
    let start = Instant::now();

    let result = state
        .validator
        .validate_demand_for_parent(
            &request.references,
            &request.parent,
            state.dictionary(request.dictionary.as_ref()),
        )
        .await;

    METRICS.record_validation(start, result.is_valid);
    Ok(Json(result))
}

/// Validate template references for a number of template editions.
pub async fn validate_template(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TemplateValidationRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, Error> {
    let Json(request) = accept(&state, body)?;
    METRICS.template_validations.fetch_add(1, Ordering::Relaxed);
    let start = Instant::now();

    let result = state
        .validator
        .validate_demand_for_template(
            &request.references,
            request.template_editions,
            state.dictionary(request.dictionary.as_ref()),
        )
        .await;

    METRICS.record_validation(start, result.is_valid);
    Ok(Json(result))
}

/// Validate a user's futures credits for the referenced children.
pub async fn validate_futures(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FuturesValidationRequest>, JsonRejection>,
) -> Result<Json<FuturesCreditsValidationResult>, Error> {
    let Json(request) = accept(&state, body)?;
    METRICS.futures_validations.fetch_add(1, Ordering::Relaxed);
    let start = Instant::now();

    let result = state
        .validator
        .validate_futures_credits(
            &request.references,
            request.editions,
            request.user,
            request.availability,
            state.dictionary(request.dictionary.as_ref()),
        )
        .await;

    METRICS.record_validation(start, result.is_valid);
    Ok(Json(result))
}

/// Count the request and turn a body rejection into a 400.
fn accept<T>(
    state: &AppState,
    body: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    body.map_err(|rejection| {
        METRICS.bad_requests.fetch_add(1, Ordering::Relaxed);
        warn!(error = %rejection.body_text(), "Rejected request body");
        Error::BadRequest(rejection.body_text())
    })
}
