//! Embeddings generation module
//!
//! Turns text into fixed-size vectors through an OpenAI-compatible
//! `/embeddings` endpoint (`text-embedding-ada-002` by default, 1536 dimensions).
//!
//! # Examples
//!
//! ```rust,no_run
//! use bookrag::config::AppConfig;
//! use bookrag::embeddings::EmbeddingClient;
//! use bookrag::embeddings::Embedder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = EmbeddingClient::from_config(&config.openai, config.embedding_dimension())?;
//!
//!     let embedding = client.embed("What is a humanoid robot?").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;

use async_trait::async_trait;
pub use client::EmbeddingClient;

use crate::errors::BookRagError;
use crate::errors::Result;

/// Default embedding dimension for OpenAI text-embedding-ada-002
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Text to vector conversion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Embedder: Send + Sync {
    /// One vector per input text, in input order, from a single provider call
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text by way of [`Embedder::embed_batch`]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BookRagError::EmbeddingError("No embedding in response".to_string()))
    }
}
