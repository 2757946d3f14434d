//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers;
use super::handlers::AppState;

/// Prefix the service was historically mounted under
pub const API_PREFIX: &str = "/api/v1";

/// RAG endpoints plus liveness routes
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/rag/query", post(handlers::rag_query))
        .route("/rag/index", post(handlers::rag_index))
        .route("/rag/status", get(handlers::rag_status))
        .with_state(state)
}

/// Routes served both at the root and under [`API_PREFIX`]
pub fn app_router(state: AppState) -> Router {
    let routes = api_routes(state);
    Router::new()
        .merge(routes.clone())
        .nest(API_PREFIX, routes)
}
