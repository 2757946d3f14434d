//! Complete RAG pipeline: Embed -> Retrieve -> Generate -> Attribute

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::config::RagConfig;
use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::llm::ChatModel;
use crate::llm::CompletionParams;
use crate::models::ChunkPayload;
use crate::models::Document;
use crate::models::GroundingMode;
use crate::models::IndexAck;
use crate::models::ScoredChunk;
use crate::models::Source;
use crate::rag::prompts;
use crate::rag::ContextAssembler;
use crate::vector_store::VectorStore;

/// Retrieval and generation knobs
#[derive(Debug, Clone, Copy)]
pub struct RagOptions {
    pub context_limit: usize,
    pub source_limit: usize,
    pub completion: CompletionParams,
    pub concurrent_search: bool,
}

impl Default for RagOptions {
    fn default() -> Self {
        Self {
            context_limit: 5,
            source_limit: 3,
            completion: CompletionParams::default(),
            concurrent_search: false,
        }
    }
}

impl From<&RagConfig> for RagOptions {
    fn from(config: &RagConfig) -> Self {
        Self {
            context_limit: config.context_limit,
            source_limit: config.source_limit,
            completion: CompletionParams {
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
            concurrent_search: config.concurrent_search,
        }
    }
}

/// Generated answer with its attributions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagAnswer {
    pub answer: String,
    pub sources: Vec<Source>,
}

/// Complete RAG service
pub struct RagService {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    llm: Arc<dyn ChatModel>,
    context_assembler: ContextAssembler,
    options: RagOptions,
}

impl RagService {
    /// Create from existing services
    #[must_use]
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        llm: Arc<dyn ChatModel>,
        options: RagOptions,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            llm,
            context_assembler: ContextAssembler::default(),
            options,
        }
    }

    /// Answer `question` grounded either in the indexed book or in a selected passage
    ///
    /// # Errors
    /// - Embedding generation errors
    /// - Vector search errors
    /// - LLM generation errors (API failures, rate limits, invalid responses)
    pub async fn process_query(
        &self,
        question: &str,
        grounding_mode: GroundingMode,
        selected_text: Option<&str>,
    ) -> Result<RagAnswer> {
        info!(
            "Processing RAG query ({}): {}",
            grounding_mode.as_str(),
            question
        );

        // An empty selection behaves like no selection at all
        let passage = selected_text.filter(|text| !text.is_empty());
        let sources_from_search = grounding_mode == GroundingMode::FullBook && passage.is_none();

        debug!("Step 1: Embedding question");
        let query_embedding = self.embedder.embed(question).await?;

        debug!("Step 2: Determining context");
        let (context, prefetched_sources) = match (grounding_mode, passage) {
            (GroundingMode::SelectedText, Some(text)) => (text.to_string(), None),
            _ if sources_from_search && self.options.concurrent_search => {
                let (context_hits, source_hits) = futures::try_join!(
                    self.vector_store
                        .search(&query_embedding, self.options.context_limit),
                    self.vector_store
                        .search(&query_embedding, self.options.source_limit),
                )?;
                (self.context_assembler.assemble(&context_hits), Some(source_hits))
            }
            _ => {
                let hits = self
                    .vector_store
                    .search(&query_embedding, self.options.context_limit)
                    .await?;
                debug!("Retrieved {} context chunks", hits.len());
                (self.context_assembler.assemble(&hits), None)
            }
        };

        debug!("Step 3: Generating answer");
        let messages = prompts::grounded_messages(question, &context);
        let answer = self
            .llm
            .complete(&messages, self.options.completion)
            .await?;

        debug!("Step 4: Collecting sources");
        let sources = if sources_from_search {
            let hits: Vec<ScoredChunk> = match prefetched_sources {
                Some(hits) => hits,
                None => {
                    self.vector_store
                        .search(&query_embedding, self.options.source_limit)
                        .await?
                }
            };
            hits.into_iter().map(Source::from).collect()
        } else if let Some(text) = passage {
            vec![self.context_assembler.selected_text_source(text)]
        } else {
            Vec::new()
        };

        info!("RAG query completed with {} sources", sources.len());
        Ok(RagAnswer { answer, sources })
    }

    /// Embed a document's content and store it with its identifying payload
    pub async fn index_document(&self, document: &Document) -> Result<IndexAck> {
        let embedding = self.embedder.embed(&document.content).await?;
        let point_id = self
            .vector_store
            .upsert(embedding, ChunkPayload::from(document))
            .await?;

        debug!("Indexed document {} as point {}", document.id, point_id);
        Ok(IndexAck::indexed(document.id.clone()))
    }

    /// Index documents one at a time; the first failure aborts the rest
    pub async fn index_documents(&self, documents: &[Document]) -> Result<Vec<IndexAck>> {
        let mut results = Vec::with_capacity(documents.len());
        for document in documents {
            results.push(self.index_document(document).await?);
        }
        info!("Indexed {} documents", results.len());
        Ok(results)
    }
}
