//! Completion backends
//!
//! `CompletionBackend` is the seam between the analyzer and the remote
//! model. `HttpCompletionBackend` talks to an OpenAI-compatible
//! `/chat/completions` endpoint with a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::AnalysisError;

/// GitHub Models inference endpoint
pub const DEFAULT_ENDPOINT: &str = "https://models.inference.ai.azure.com";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Used when no token is configured; every request will be rejected
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GITHUB_TOKEN_HERE";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Sends one prompt and returns the raw reply text
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError>;

    /// Model identifier sent with each request
    fn model(&self) -> &str;
}

/// Connection settings for `HttpCompletionBackend`
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn has_placeholder_key(&self) -> bool {
        self.api_key.is_empty() || self.api_key == PLACEHOLDER_API_KEY
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completion client
pub struct HttpCompletionBackend {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpCompletionBackend {
    pub fn new(config: ClientConfig) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalysisError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Sending {} prompt bytes", prompt.len());

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedReply(format!("bad completion payload: {}", e)))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AnalysisError::EmptyReply)?;

        debug!("Received {} reply bytes", content.len());
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
