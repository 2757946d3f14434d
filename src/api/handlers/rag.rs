/// RAG-related API handlers
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use tracing::error;
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::error::Operation;
use crate::api::types::IndexRequest;
use crate::api::types::IndexResponse;
use crate::api::types::QueryRequest;
use crate::api::types::QueryResponse;
use crate::api::types::StatusResponse;
use crate::errors::BookRagError;
use crate::models::GroundingMode;

/// Answer a question (POST /rag/query)
pub async fn rag_query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::rejected(Operation::Query, &rejection))?;
    info!("POST /rag/query: {}", req.question);

    if req.question.trim().is_empty() {
        return Err(ApiError::query(BookRagError::Validation(
            "question must not be empty".to_string(),
        )));
    }
    let grounding_mode = req
        .grounding_mode
        .parse::<GroundingMode>()
        .map_err(ApiError::query)?;

    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("session_{}", Uuid::new_v4()));

    let answer = state
        .rag
        .process_query(&req.question, grounding_mode, req.selected_text.as_deref())
        .await
        .map_err(|e| {
            error!("Error processing RAG query: {}", e);
            ApiError::query(e)
        })?;

    state
        .sessions
        .append(&session_id, &req.question, &answer.answer, &answer.sources)
        .await
        .map_err(ApiError::query)?;

    Ok(Json(QueryResponse {
        id: format!("response_{}", Uuid::new_v4()),
        question: req.question,
        answer: answer.answer,
        sources: answer.sources,
        session_id,
        timestamp: Utc::now(),
    }))
}

/// Index a batch of documents (POST /rag/index)
pub async fn rag_index(
    State(state): State<AppState>,
    payload: Result<Json<IndexRequest>, JsonRejection>,
) -> Result<Json<IndexResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::rejected(Operation::Index, &rejection))?;
    info!("POST /rag/index: {} documents", req.documents.len());

    let results = state
        .rag
        .index_documents(&req.documents)
        .await
        .map_err(|e| {
            error!("Error indexing documents: {}", e);
            ApiError::index(e)
        })?;

    Ok(Json(IndexResponse {
        indexed_count: results.len(),
        results,
    }))
}

/// Static service status (GET /rag/status)
pub async fn rag_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "healthy".to_string(),
        indexed_documents: "unknown".to_string(),
        model: state.embedding_model.clone(),
        timestamp: Utc::now(),
    })
}
