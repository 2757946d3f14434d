//! CLI command handlers

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::cli::output::*;
use crate::database::Database;
use crate::database::SessionStore;
use crate::models::Document;
use crate::models::GroundingMode;
use crate::services::ServiceSet;
use crate::AppConfig;
use crate::BookRagError;
use crate::Result;

pub async fn handle_serve(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    no_cors: bool,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let cors = config.server.cors && !no_cors;

    println!("🚀 Starting BookRAG API Server");
    println!("===============================\n");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("🌐 CORS: {}", if cors { "Enabled" } else { "Disabled" });
    println!();

    let services = ServiceSet::from_config(config).await?;
    crate::api::serve_api(services, &host, port, cors).await
}

/// Documents file in either accepted layout
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentsFile {
    Bare(Vec<Document>),
    Wrapped { documents: Vec<Document> },
}

impl DocumentsFile {
    fn into_documents(self) -> Vec<Document> {
        match self {
            Self::Bare(documents) | Self::Wrapped { documents } => documents,
        }
    }
}

/// Read documents from a JSON file
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let raw = std::fs::read_to_string(path)?;
    let file: DocumentsFile = serde_json::from_str(&raw).map_err(|e| {
        BookRagError::Validation(format!("{} is not a documents file: {e}", path.display()))
    })?;
    Ok(file.into_documents())
}

pub async fn handle_index(config: &AppConfig, path: &Path) -> Result<()> {
    let documents = load_documents(path)?;
    info!("Loaded {} documents from {}", documents.len(), path.display());

    let services = ServiceSet::from_config(config).await?;
    let results = services.rag.index_documents(&documents).await?;

    println!("✅ Indexed {} documents", results.len());
    for ack in &results {
        println!("  - {} ({})", ack.document_id, ack.status);
    }
    Ok(())
}

pub async fn handle_query(
    config: &AppConfig,
    question: &str,
    mode: GroundingMode,
    selected_text: Option<&str>,
) -> Result<()> {
    if question.trim().is_empty() {
        return Err(BookRagError::Validation(
            "question must not be empty".to_string(),
        ));
    }

    let services = ServiceSet::from_config(config).await?;
    let answer = services
        .rag
        .process_query(question, mode, selected_text)
        .await?;

    print_answer(&answer);
    Ok(())
}

pub async fn handle_sessions(config: &AppConfig, session_id: &str) -> Result<()> {
    let database = Database::from_config(config).await?;
    let records = database.list(session_id).await?;
    print_session_records(session_id, &records);
    Ok(())
}

pub fn handle_config(config: &AppConfig) {
    print_config(config);
}
