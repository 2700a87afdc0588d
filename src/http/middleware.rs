use std::time::{Duration, Instant};

use ::http::HeaderValue;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::Instrument;
use uuid::Uuid;

use super::types::ApiError;

/// Runs each request in its own task under an `http.request` span.
///
/// A handler that panics only fails its own request: the join error is
/// logged and answered with a 500, and the server keeps serving.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %request.method(),
        route = %request.uri().path(),
    );
    let started = Instant::now();

    let mut response = match tokio::spawn(next.run(request).instrument(span.clone())).await {
        Ok(response) => response,
        Err(err) => {
            span.in_scope(|| tracing::error!(error = %err, "request handler failed"));
            ApiError::internal().into_response()
        }
    };

    span.in_scope(|| {
        tracing::info!(status = response.status().as_u16(), latency_ms = elapsed_ms(started), "request completed")
    });
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

fn elapsed_ms(started: Instant) -> u64 { saturating_ms(started.elapsed()) }

fn saturating_ms(elapsed: Duration) -> u64 { u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX) }
