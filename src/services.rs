//! Process-wide service wiring

use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::database::Database;
use crate::database::SessionStore;
use crate::embeddings::EmbeddingClient;
use crate::llm::LlmService;
use crate::rag::RagOptions;
use crate::rag::RagService;
use crate::vector_store::QdrantStore;
use crate::Result;

/// Everything a request needs, built once at startup
#[derive(Clone)]
pub struct ServiceSet {
    pub rag: Arc<RagService>,
    pub sessions: Arc<dyn SessionStore>,
    pub embedding_model: String,
}

impl ServiceSet {
    /// Connect to every collaborator named in `config`
    ///
    /// # Errors
    /// Fails when a client cannot be built, the Qdrant collection cannot be
    /// ensured, or PostgreSQL refuses the connection.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let embedder = EmbeddingClient::from_config(&config.openai, config.embedding_dimension())?;
        let llm = LlmService::from_config(&config.openai)?;
        info!(
            "Using embedding model {} and chat model {}",
            embedder.model(),
            llm.model()
        );

        let vector_store = QdrantStore::connect(&config.qdrant).await?;
        info!(
            "Qdrant collection '{}' ready for {}-dimensional embeddings",
            vector_store.collection(),
            embedder.dimension()
        );
        let database = Database::from_config(config).await?;

        let rag = RagService::new(
            Arc::new(embedder),
            Arc::new(vector_store),
            Arc::new(llm),
            RagOptions::from(&config.rag),
        );

        Ok(Self::new(
            Arc::new(rag),
            Arc::new(database),
            config.embedding_model(),
        ))
    }

    /// Assemble from already-built parts
    #[must_use]
    pub fn new(
        rag: Arc<RagService>,
        sessions: Arc<dyn SessionStore>,
        embedding_model: impl Into<String>,
    ) -> Self {
        Self {
            rag,
            sessions,
            embedding_model: embedding_model.into(),
        }
    }
}
