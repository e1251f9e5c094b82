//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Catalog
//! GET  /api/products                    - Product listing (?category=&rootstock=)
//! GET  /api/products/filters            - Filter values
//! GET  /api/products/{id}               - Product detail with price tiers
//!
//! # Orders
//! POST /api/telegram                    - Submit order to the shop's Telegram chat
//!
//! # Nova Poshta
//! POST /api/novapost/divisions          - Settlement search by name
//! GET  /api/novapost/divisions          - Usage description
//! POST /api/novapost/local-divisions    - Warehouses of a city
//! GET  /api/novapost/local-divisions    - Usage description
//! ```

pub mod novaposhta;
pub mod orders;
pub mod products;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/filters", get(products::filters))
        .route("/{id}", get(products::show))
}

/// Create the Nova Poshta routes router.
pub fn novapost_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/divisions",
            get(novaposhta::divisions_usage).post(novaposhta::divisions),
        )
        .route(
            "/local-divisions",
            get(novaposhta::local_divisions_usage).post(novaposhta::local_divisions),
        )
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/novapost", novapost_routes())
        .route("/api/telegram", post(orders::submit))
}

/// Build the complete application: routes, health check, request ids and
/// request tracing. Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
