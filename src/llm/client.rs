use anyhow::Context;
use axum::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_MODEL: &str = "mistral-small-latest";
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LlmConfigError {
    #[error("MISTRAL_API_KEY is not set")]
    MissingApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    fn model(&self) -> &str;
    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String>;
}

/// Mistral chat-completions client.
#[derive(Clone)]
pub struct MistralClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for MistralClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl MistralClient {
    /// Fails before touching the network when the key is absent or empty.
    pub fn new(api_key: Option<String>, model: Option<String>) -> Result<Self, LlmConfigError> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or(LlmConfigError::MissingApiKey)?;
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            model: model
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, LlmConfigError> {
        let client = Self::new(
            std::env::var("MISTRAL_API_KEY").ok(),
            std::env::var("MISTRAL_MODEL").ok(),
        )?;
        Ok(match std::env::var("MISTRAL_BASE_URL") {
            Ok(url) if !url.is_empty() => client.with_base_url(url),
            _ => client,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[async_trait]
impl ChatClient for MistralClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let res: CompletionResponse = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await
            .context("mistral request")?
            .error_for_status()
            .context("mistral status")?
            .json()
            .await
            .context("mistral response body")?;

        let reply = res
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("mistral returned no choices")?;
        debug!(model = %self.model, chars = reply.len(), "completion received");
        Ok(reply)
    }
}
