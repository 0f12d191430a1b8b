//! OpenAI API Provider
//!
//! LLM provider using OpenAI's Chat Completions API, plain and streamed.

use async_trait::async_trait;
use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::sse::{Frame, SseDecoder};
use super::{ChatRequest, CompletionProvider, FragmentStream};
use crate::config::AiConfig;
use crate::types::{AiError, DraftError, ErrorCategory, ErrorClassifier, Result};

const PROVIDER_NAME: &str = "openai";

/// OpenAI API Provider with secure API key handling
pub struct OpenAiProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: Option<SecretString>,
    endpoint: url::Url,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl OpenAiProvider {
    /// Build the provider; a missing key is not an error here
    ///
    /// Without a key the provider reports itself unavailable and every call
    /// fails immediately with an `Auth` AI error.
    pub fn new(config: &AiConfig) -> Result<Self> {
        let endpoint = chat_endpoint(&config.api_base)?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| DraftError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(|key| SecretString::from(key.to_string())),
            endpoint,
            client,
        })
    }

    fn post(&self, request: &ChatRequest) -> Result<reqwest::RequestBuilder> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AiError::not_configured(PROVIDER_NAME))?;

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key.expose_secret())
            .json(request);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }

    async fn send(&self, request: &ChatRequest) -> Result<reqwest::Response> {
        let response = self
            .post(request)?
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, PROVIDER_NAME))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAI API error ({})", status);
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("OpenAI API error ({}): {}", status, body),
                PROVIDER_NAME,
            )
            .into());
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>> {
        info!(
            "Generating with OpenAI (model: {}, max_tokens: {}, messages: {})",
            request.model,
            request.max_tokens,
            request.messages.len()
        );

        let start_time = Instant::now();
        let response = self.send(&request).await?;

        let response_body: ChatCompletionResponse = response.json().await.map_err(|e| {
            AiError::with_provider(
                ErrorCategory::ParseError,
                format!("Failed to parse OpenAI response: {}", e),
                PROVIDER_NAME,
            )
        })?;

        if let Some(usage) = &response_body.usage {
            debug!(
                "OpenAI usage: {} prompt + {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }
        debug!("OpenAI responded in {:?}", start_time.elapsed());

        Ok(response_body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }

    async fn stream(&self, request: ChatRequest) -> Result<FragmentStream> {
        let request = ChatRequest {
            stream: Some(true),
            ..request
        };
        info!(
            "Streaming with OpenAI (model: {}, max_tokens: {})",
            request.model, request.max_tokens
        );

        let response = self.send(&request).await?;
        let mut bytes = response.bytes_stream();

        let fragments = async_stream::stream! {
            let mut decoder = SseDecoder::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        warn!("OpenAI stream interrupted: {}", e);
                        yield Err(DraftError::from(ErrorClassifier::classify_transport(&e, PROVIDER_NAME)));
                        return;
                    }
                };

                for frame in decoder.push(&chunk) {
                    if let Frame::Delta(text) = frame {
                        yield Ok(text);
                    }
                }
                if decoder.is_done() {
                    debug!("OpenAI stream finished");
                    return;
                }
            }

            for frame in decoder.finish() {
                if let Frame::Delta(text) = frame {
                    yield Ok(text);
                }
            }
        };

        Ok(Box::pin(fragments))
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// `{api_base}/chat/completions`, tolerating a trailing slash on the base
fn chat_endpoint(api_base: &str) -> Result<url::Url> {
    let base = format!("{}/", api_base.trim_end_matches('/'));
    url::Url::parse(&base)
        .and_then(|u| u.join("chat/completions"))
        .map_err(|e| DraftError::Config(format!("Invalid API base URL '{}': {}", api_base, e)))
}

// Response types

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::message::Message;
    use crate::ai::testing::{MockResponse, MockServer};
    use futures::TryStreamExt;
    use serde_json::json;

    fn config_for(server: &MockServer) -> AiConfig {
        AiConfig {
            api_key: Some("test-key".to_string()),
            api_base: server.url(),
            ..AiConfig::default()
        }
    }

    fn request(prompt: &str) -> ChatRequest {
        ChatRequest::new("gpt-4o-mini", vec![Message::user(prompt)])
    }

    #[test]
    fn test_chat_endpoint() {
        assert_eq!(
            chat_endpoint("https://api.openai.com/v1").unwrap().as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            chat_endpoint("http://localhost:8080/v1/").unwrap().as_str(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert!(chat_endpoint("not a url").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AiConfig {
            api_key: Some("sk-secret".to_string()),
            ..AiConfig::default()
        };
        let provider = OpenAiProvider::new(&config).unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_complete_sends_wire_contract() {
        let server = MockServer::start(vec![MockResponse::json(
            200,
            json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Réponse"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3}
            }),
        )])
        .await;
        let provider = OpenAiProvider::new(&config_for(&server)).unwrap();

        let text = provider.complete(request("Bonjour").max_tokens(1024)).await.unwrap();
        assert_eq!(text.as_deref(), Some("Réponse"));

        let captured = server.requests();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].path, "/v1/chat/completions");
        assert_eq!(
            captured[0].header("authorization"),
            Some("Bearer test-key")
        );
        let body = captured[0].json();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["messages"], json!([{"role": "user", "content": "Bonjour"}]));
        assert!(body.get("stream").is_none());
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_none() {
        let server = MockServer::start(vec![MockResponse::json(200, json!({"choices": []}))]).await;
        let provider = OpenAiProvider::new(&config_for(&server)).unwrap();

        assert_eq!(provider.complete(request("x")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_http_error_is_classified() {
        let server = MockServer::start(vec![MockResponse::json(
            401,
            json!({"error": {"message": "Incorrect API key provided"}}),
        )])
        .await;
        let provider = OpenAiProvider::new(&config_for(&server)).unwrap();

        let err = provider.complete(request("x")).await.unwrap_err();
        let ai = err.as_ai().unwrap();
        assert_eq!(ai.category, ErrorCategory::Auth);
        assert!(ai.message.contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_parse_error() {
        let server = MockServer::start(vec![MockResponse::text(200, "<html>oops</html>")]).await;
        let provider = OpenAiProvider::new(&config_for(&server)).unwrap();

        let err = provider.complete(request("x")).await.unwrap_err();
        assert_eq!(err.as_ai().unwrap().category, ErrorCategory::ParseError);
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let config = AiConfig {
            api_key: Some("   ".to_string()),
            api_base: "http://127.0.0.1:9".to_string(),
            ..AiConfig::default()
        };
        let provider = OpenAiProvider::new(&config).unwrap();
        assert!(!provider.is_configured());

        let err = provider.complete(request("x")).await.unwrap_err();
        assert_eq!(err.as_ai().unwrap().category, ErrorCategory::Auth);

        let err = provider.stream(request("x")).await.err().unwrap();
        assert_eq!(err.as_ai().unwrap().category, ErrorCategory::Auth);
    }

    #[tokio::test]
    async fn test_stream_yields_fragments() {
        let server = MockServer::start(vec![MockResponse::event_stream(vec![
            ": keep-alive\n\ndata: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n".to_string(),
            "data: {\"choices\":[{\"delta\":{\"content\":\"Art\"}}]}\n\ndata: {\"choi".to_string(),
            "ces\":[{\"delta\":{\"content\":\"icle 1\"}}]}\n\ndata: {broken\n\n".to_string(),
            "data: [DONE]\n\n".to_string(),
        ])])
        .await;
        let provider = OpenAiProvider::new(&config_for(&server)).unwrap();

        let fragments: Vec<String> = provider
            .stream(request("x"))
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(fragments, vec!["Art", "icle 1"]);
        assert_eq!(server.requests()[0].json()["stream"], json!(true));
    }

    #[tokio::test]
    async fn test_stream_open_error_is_returned() {
        let server = MockServer::start(vec![MockResponse::json(
            429,
            json!({"error": {"message": "Rate limit reached"}}),
        )])
        .await;
        let provider = OpenAiProvider::new(&config_for(&server)).unwrap();

        let err = provider.stream(request("x")).await.err().unwrap();
        assert_eq!(err.as_ai().unwrap().category, ErrorCategory::RateLimit);
    }
}
