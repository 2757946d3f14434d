//! Vector similarity index for textbook chunks

pub mod qdrant;

use async_trait::async_trait;
pub use qdrant::QdrantStore;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::ChunkPayload;
use crate::models::ScoredChunk;

/// Repository trait for vector storage operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection when it is missing; an "already exists" race counts as success
    async fn ensure_collection(&self) -> Result<()>;

    /// Store one point under a fresh id and return that id
    async fn upsert(&self, vector: Vec<f32>, payload: ChunkPayload) -> Result<Uuid>;

    /// Up to `limit` nearest points, best first
    async fn search(&self, query_vector: &[f32], limit: usize) -> Result<Vec<ScoredChunk>>;
}
