//! API request and response types

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::ErrorKind;
use crate::models::Document;
use crate::models::IndexAck;
use crate::models::Source;

/// RAG query request
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    /// `full_book` or `selected_text`; parsed by the handler so bad values
    /// read as validation errors
    pub grounding_mode: String,
    #[serde(default)]
    pub selected_text: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// RAG query response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub sources: Vec<Source>,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Batch of documents to index
#[derive(Debug, Deserialize)]
pub struct IndexRequest {
    pub documents: Vec<Document>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    pub indexed_count: usize,
    pub results: Vec<IndexAck>,
}

/// Static service status
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub indexed_documents: String,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    pub kind: ErrorKind,
}
