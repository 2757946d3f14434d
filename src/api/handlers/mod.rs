/// API request handlers
use std::sync::Arc;

use axum::Json;

use crate::api::types::HealthResponse;
use crate::api::types::RootResponse;
use crate::database::SessionStore;
use crate::rag::RagService;
use crate::services::ServiceSet;

pub mod rag;

pub use rag::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub rag: Arc<RagService>,
    pub sessions: Arc<dyn SessionStore>,
    pub embedding_model: String,
}

impl From<ServiceSet> for AppState {
    fn from(services: ServiceSet) -> Self {
        Self {
            rag: services.rag,
            sessions: services.sessions,
            embedding_model: services.embedding_model,
        }
    }
}

/// Root handler
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Physical AI & Humanoid Robotics RAG API".to_string(),
    })
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "RAG API".to_string(),
    })
}
