//! Qdrant-backed vector store

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::CreateCollectionBuilder;
use qdrant_client::qdrant::Distance;
use qdrant_client::qdrant::PointStruct;
use qdrant_client::qdrant::SearchPointsBuilder;
use qdrant_client::qdrant::UpsertPointsBuilder;
use qdrant_client::qdrant::Value as QdrantValue;
use qdrant_client::qdrant::VectorParamsBuilder;
use qdrant_client::Qdrant;
use tracing::debug;
use tracing::info;
use uuid::Uuid;

use super::VectorStore;
use crate::config::QdrantConfig;
use crate::errors::BookRagError;
use crate::errors::Result;
use crate::models::ChunkPayload;
use crate::models::ScoredChunk;

/// Qdrant collection holding one point per indexed chunk
pub struct QdrantStore {
    client: Qdrant,
    collection: String,
    vector_size: u64,
}

impl QdrantStore {
    /// Build the client and make sure the collection exists
    pub async fn connect(config: &QdrantConfig) -> Result<Self> {
        let client = Qdrant::from_url(&config.url)
            .api_key(config.api_key.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BookRagError::VectorStoreError(format!("Failed to build client: {e}")))?;

        info!("Qdrant client configured for {}", config.url);

        let store = Self {
            client,
            collection: config.collection.clone(),
            vector_size: config.vector_size,
        };
        store.ensure_collection().await?;

        Ok(store)
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn ensure_collection(&self) -> Result<()> {
        if self.client.collection_exists(self.collection.as_str()).await? {
            debug!("Qdrant collection '{}' already exists", self.collection);
            return Ok(());
        }

        info!(
            "Creating Qdrant collection '{}' (size={}, distance=cosine)",
            self.collection, self.vector_size
        );
        let request = CreateCollectionBuilder::new(self.collection.as_str())
            .vectors_config(VectorParamsBuilder::new(self.vector_size, Distance::Cosine));

        match self.client.create_collection(request).await {
            Ok(_) => {
                info!("Collection '{}' created", self.collection);
                Ok(())
            }
            Err(e) if is_already_exists(&e.to_string()) => {
                info!(
                    "Collection '{}' was created concurrently, skipping creation",
                    self.collection
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert(&self, vector: Vec<f32>, payload: ChunkPayload) -> Result<Uuid> {
        let point_id = Uuid::new_v4();
        debug!(
            "Upserting point {} for document {} (chunk {})",
            point_id, payload.document_id, payload.chunk_index
        );

        let point = PointStruct::new(point_id.to_string(), vector, payload_to_qdrant(payload));
        self.client
            .upsert_points(
                UpsertPointsBuilder::new(self.collection.as_str(), vec![point]).wait(true),
            )
            .await?;

        Ok(point_id)
    }

    async fn search(&self, query_vector: &[f32], limit: usize) -> Result<Vec<ScoredChunk>> {
        let request =
            SearchPointsBuilder::new(self.collection.as_str(), query_vector.to_vec(), limit as u64)
                .with_payload(true);

        let response = self.client.search_points(request).await?;
        debug!(
            "Qdrant search returned {} hits (limit {})",
            response.result.len(),
            limit
        );

        Ok(response
            .result
            .into_iter()
            .map(|point| ScoredChunk {
                payload: payload_from_qdrant(point.payload),
                score: point.score,
            })
            .collect())
    }
}

/// Qdrant reports the creation race only through its message text
fn is_already_exists(message: &str) -> bool {
    message.to_lowercase().contains("already exists")
}

fn payload_to_qdrant(payload: ChunkPayload) -> HashMap<String, QdrantValue> {
    HashMap::from([
        ("document_id".to_string(), QdrantValue::from(payload.document_id)),
        ("title".to_string(), QdrantValue::from(payload.title)),
        ("module".to_string(), QdrantValue::from(payload.module)),
        ("chapter".to_string(), QdrantValue::from(payload.chapter)),
        ("content".to_string(), QdrantValue::from(payload.content)),
        ("chunk_id".to_string(), QdrantValue::from(payload.chunk_id)),
        ("chunk_index".to_string(), QdrantValue::from(payload.chunk_index)),
    ])
}

fn payload_from_qdrant(mut payload: HashMap<String, QdrantValue>) -> ChunkPayload {
    let mut text = |key: &str| match payload.remove(key).and_then(|v| v.kind) {
        Some(Kind::StringValue(s)) => s,
        Some(Kind::IntegerValue(i)) => i.to_string(),
        _ => String::new(),
    };

    let document_id = text("document_id");
    let title = text("title");
    let module = text("module");
    let chapter = text("chapter");
    let content = text("content");
    let chunk_id = text("chunk_id");

    let chunk_index = match payload.remove("chunk_index").and_then(|v| v.kind) {
        Some(Kind::IntegerValue(i)) => i,
        Some(Kind::DoubleValue(f)) => f as i64,
        Some(Kind::StringValue(s)) => s.parse().unwrap_or_default(),
        _ => 0,
    };

    ChunkPayload {
        document_id,
        title,
        module,
        chapter,
        content,
        chunk_id,
        chunk_index,
    }
}
