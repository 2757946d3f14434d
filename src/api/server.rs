//! HTTP server implementation

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::services::ServiceSet;
use crate::Result;

/// Router with tracing, compression and optional permissive CORS applied
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let mut app = routes::app_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(
    services: ServiceSet,
    host: &str,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    info!("Starting RAG API server...");

    let app = build_app(AppState::from(services), enable_cors);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Available endpoints (also under {}):", routes::API_PREFIX);
    info!("  GET  /            - Service banner");
    info!("  GET  /health      - Health check");
    info!("  POST /rag/query   - Answer a question");
    info!("  POST /rag/index   - Index documents");
    info!("  GET  /rag/status  - Service status");

    axum::serve(listener, app).await?;

    Ok(())
}
