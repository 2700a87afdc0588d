pub mod todos;

use axum::{http::StatusCode, middleware, routing::get, Router};
use tower::ServiceBuilder;

use super::middleware::request_tracing;
use super::types::ApiError;

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(router)
        .fallback(|| async { ApiError::not_found() })
        .method_not_allowed_fallback(|| async { ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed") })
        .layer(ServiceBuilder::new().layer(middleware::from_fn(request_tracing)))
}
