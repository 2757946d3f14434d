//! OpenAI-compatible embeddings API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::Embedder;
use crate::config::OpenAiConfig;
use crate::errors::BookRagError;
use crate::errors::Result;

/// Client for the `/embeddings` endpoint
pub struct EmbeddingClient {
    model: String,
    endpoint: String,
    api_key: String,
    dimension: usize,
    client: Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [String],
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid TLS configuration)
    pub fn new(
        model: String,
        endpoint: String,
        api_key: String,
        dimension: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BookRagError::HttpError(e.to_string()))?;

        Ok(Self {
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            dimension,
            client,
        })
    }

    /// Create a client from the `[openai]` config section
    pub fn from_config(config: &OpenAiConfig, dimension: usize) -> Result<Self> {
        Self::new(
            config.embedding_model.clone(),
            config.base_url.clone(),
            config.api_key.clone(),
            dimension,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Get the model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the expected embedding dimension
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    fn check_shape(&self, expected: usize, mut data: Vec<EmbeddingData>) -> Result<Vec<Vec<f32>>> {
        if data.len() != expected {
            return Err(BookRagError::EmbeddingError(format!(
                "Expected {expected} embeddings, provider returned {}",
                data.len()
            )));
        }

        // Providers may return items out of order
        data.sort_by_key(|d| d.index);

        data.into_iter()
            .map(|d| {
                if d.embedding.len() == self.dimension {
                    Ok(d.embedding)
                } else {
                    Err(BookRagError::EmbeddingError(format!(
                        "Embedding dimension mismatch: expected {}, got {}",
                        self.dimension,
                        d.embedding.len()
                    )))
                }
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    /// # Errors
    /// - API request failures (network errors, timeouts, authentication failures)
    /// - Invalid API responses (malformed JSON, wrong count, wrong dimensions)
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embeddings", self.endpoint);
        debug!("Calling embeddings API: {} items via {}", texts.len(), url);

        let request = EmbeddingRequest {
            input: texts,
            model: &self.model,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| BookRagError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BookRagError::EmbeddingError(format!(
                "Embeddings API error ({status}): {error_text}"
            )));
        }

        let result: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| BookRagError::EmbeddingError(format!("Failed to parse response: {e}")))?;

        self.check_shape(texts.len(), result.data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::body_partial_json;
    use wiremock::matchers::header;
    use wiremock::matchers::method;
    use wiremock::matchers::path;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;

    use super::*;

    fn client_for(server: &MockServer, dimension: usize) -> EmbeddingClient {
        EmbeddingClient::new(
            "text-embedding-ada-002".to_string(),
            server.uri(),
            "sk-test".to_string(),
            dimension,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "text-embedding-ada-002",
                "input": ["first", "second"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "index": 1, "embedding": [0.0, 1.0, 0.0] },
                    { "index": 0, "embedding": [1.0, 0.0, 0.0] }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let vectors = client
            .embed_batch(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        assert_eq!(vectors, vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
    }

    #[tokio::test]
    async fn test_single_text_goes_through_batch_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(body_partial_json(json!({ "input": ["hello"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "index": 0, "embedding": [0.5, 0.5] }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, 2);
        let vector = client.embed("hello").await.unwrap();

        assert_eq!(vector, vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, 2);
        assert!(client.embed_batch(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = client_for(&server, 2);
        let err = client.embed("hello").await.unwrap_err();

        assert!(matches!(err, BookRagError::EmbeddingError(_)));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "index": 0, "embedding": [0.1, 0.2, 0.3] }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 1536);
        assert_eq!(client.dimension(), 1536);
        let err = client.embed("hello").await.unwrap_err();

        assert!(err.to_string().contains("dimension mismatch"));
    }

    #[tokio::test]
    #[ignore = "Requires OPENAI_API_KEY"]
    async fn test_openai_embedding() {
        let client = EmbeddingClient::new(
            "text-embedding-ada-002".to_string(),
            "https://api.openai.com/v1".to_string(),
            std::env::var("OPENAI_API_KEY").unwrap(),
            1536,
            Duration::from_secs(30),
        )
        .unwrap();

        let embedding = client.embed("Hello, world!").await.unwrap();
        assert_eq!(embedding.len(), 1536);
    }
}
