use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::http::error::AppError;
use crate::http::payload::JsonPayload;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::metrics;

pub const OPTIMIZE_PATH: &str = "/routes/optimize";

/// Forward the payload to the optimizer and relay its answer with 200.
pub async fn optimize_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonPayload(payload): JsonPayload,
) -> Result<Response, AppError> {
    let start_time = Instant::now();
    let request_id = headers.request_id();

    tracing::debug!(
        request_id = %request_id,
        bytes = payload.len(),
        endpoint = %state.optimizer.endpoint(),
        "Forwarding to optimizer"
    );

    let result = state.optimizer.forward(payload, request_id).await;
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_forward(outcome, start_time);

    let answer = result?;
    tracing::info!(
        request_id = %request_id,
        status = %answer.status,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Optimizer responded"
    );

    let content_type = answer
        .content_type
        .unwrap_or_else(|| HeaderValue::from_static("text/plain; charset=utf-8"));

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], answer.body).into_response())
}
