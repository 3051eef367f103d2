//! Chat-completion client.
//!
//! Sends the generation prompt to a hosted OpenAI-compatible chat-completion
//! endpoint and returns the model's answer with code fences removed.

use crate::config::ConfigError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::llm::{CompletionError, SqlGenerator};
use shared::query::{build_prompt, strip_code_fence, SYSTEM_INSTRUCTION};
use std::time::Duration;

/// Default chat-completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model name.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Upper bound on one completion call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Output token budget per completion.
pub const MAX_TOKENS: u32 = 800;

/// Completion client configuration.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Bearer token for the completion API.
    pub api_key: String,
    /// Full URL of the chat-completions endpoint.
    pub api_url: String,
    /// Model to request.
    pub model: String,
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish()
    }
}

impl CompletionConfig {
    /// Creates a configuration for the default endpoint and model.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Load completion configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GROQ_API_KEY`: API key (required)
    /// - `GROQ_API_URL`: Endpoint URL (default: [`DEFAULT_API_URL`])
    /// - `GROQ_MODEL`: Model name (default: [`DEFAULT_MODEL`])
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if `GROQ_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey("GROQ_API_KEY"))?;

        Ok(Self {
            api_key,
            api_url: lookup("GROQ_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// HTTP client for the chat-completion API.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl CompletionClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: CompletionConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    /// Sends `prompt` as the user message and returns the raw answer text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the answer has no text.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.0,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::MalformedResponse(
                    "missing choices[0].message.content".to_string(),
                )
            })
    }
}

#[async_trait]
impl SqlGenerator for CompletionClient {
    async fn generate_sql(
        &self,
        question: &str,
        schema_text: &str,
    ) -> Result<String, CompletionError> {
        let prompt = build_prompt(question, schema_text);
        let raw = self.complete(&prompt).await?;

        tracing::debug!(model = %self.config.model, raw = %raw, "Completion received");
        Ok(strip_code_fence(&raw).to_string())
    }
}
