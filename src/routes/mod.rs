//! HTTP route handlers.
//!
//! Three read-only JSON endpoints plus a JSON 404 fallback. Every response is
//! marked `no-store` since bodies carry the request time, and every request
//! runs inside a span keyed by a generated request ID.

pub mod data;
pub mod health;
pub mod home;

use axum::{extract::Request, middleware, routing::get, Extension, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::error::{AppError, AppErrorResponse};
use crate::middleware::{request_id_layer, RequestId};
use crate::state::AppState;

/// Fallback for paths with no route.
///
/// Wrong methods on known paths never reach this; they get axum's 405.
async fn not_found(
    Extension(request_id): Extension<RequestId>,
    request: Request,
) -> AppErrorResponse {
    AppErrorResponse {
        error: AppError::NotFound(request.uri().path().to_string()),
        request_id,
    }
}

/// Creates the Axum router with all routes and response headers.
pub fn create_router(state: AppState) -> Router {
    // Health check - no dependencies, kept separate from the state-backed routes
    let health_routes = Router::new().route("/health", get(health::health));

    let api_routes = Router::new()
        .route("/", get(home::index))
        .route("/api/data", get(data::get_data));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .fallback(not_found)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
