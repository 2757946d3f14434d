//! OpenAI-compatible `/chat/completions` client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::ChatMessage;
use super::ChatModel;
use super::CompletionParams;
use crate::config::OpenAiConfig;
use crate::errors::BookRagError;
use crate::errors::Result;

/// Chat completion service
#[derive(Clone)]
pub struct LlmService {
    model: String,
    endpoint: String,
    api_key: String,
    client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl LlmService {
    pub fn new(
        model: String,
        endpoint: String,
        api_key: String,
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
            client,
        })
    }

    pub fn from_config(config: &OpenAiConfig) -> Result<Self> {
        Self::new(
            config.chat_model.clone(),
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for LlmService {
    async fn complete(&self, messages: &[ChatMessage], params: CompletionParams) -> Result<String> {
        let url = format!("{}/chat/completions", self.endpoint);
        debug!(
            "Calling chat completions API: model={}, messages={}, max_tokens={}",
            self.model,
            messages.len(),
            params.max_tokens
        );

        let request = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
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
            return Err(BookRagError::LlmError(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| BookRagError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BookRagError::LlmError("No completion in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::body_partial_json;
    use wiremock::matchers::method;
    use wiremock::matchers::path;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;

    use super::*;

    fn service_for(server: &MockServer) -> LlmService {
        LlmService::new(
            "gpt-3.5-turbo".to_string(),
            server.uri(),
            "sk-test".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_sends_messages_and_sampling_params() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 500,
                "messages": [
                    { "role": "system", "content": "be brief" },
                    { "role": "user", "content": "hi" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "hello" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        let answer = service
            .complete(
                &[ChatMessage::system("be brief"), ChatMessage::user("hi")],
                CompletionParams::default(),
            )
            .await
            .unwrap();

        assert_eq!(answer, "hello");
    }

    #[tokio::test]
    async fn test_missing_content_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": null } }]
            })))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .complete(&[ChatMessage::user("hi")], CompletionParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, BookRagError::LlmError(_)));
    }

    #[tokio::test]
    async fn test_http_failure_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .complete(&[ChatMessage::user("hi")], CompletionParams::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("invalid api key"));
        assert_eq!(err.kind(), crate::errors::ErrorKind::Provider);
    }
}
