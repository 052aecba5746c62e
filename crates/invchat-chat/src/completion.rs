//! Chat-completion provider seam.
//!
//! `CompletionClient` is the one interface the orchestrator needs from an
//! LLM: an ordered list of role/content turns in, a reply and token usage
//! out. `OpenAiClient` implements it against an OpenAI-compatible
//! `/chat/completions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use invchat_core::config::ProviderConfig;
use invchat_core::error::InvchatError;
use invchat_core::types::{TokenUsage, Turn, PROVIDER_OPENAI};
use serde::{Deserialize, Serialize};

/// Reply text plus token counters, exactly as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub reply: String,
    pub usage: TokenUsage,
}

/// Failure of a single completion call. Never retried by the caller.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("OpenAI API error: request failed: {0}")]
    Transport(String),
    #[error("OpenAI API error: request timed out after {0}s")]
    Timeout(u64),
    #[error("OpenAI API error (status {status}): {body}")]
    Status { status: u16, body: String },
    #[error("OpenAI API error: malformed response: {0}")]
    MalformedResponse(String),
}

impl From<ProviderError> for InvchatError {
    fn from(err: ProviderError) -> Self {
        InvchatError::Provider(err.to_string())
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the full ordered message list and return the assistant reply.
    async fn complete(&self, messages: &[Turn]) -> Result<Completion, ProviderError>;

    /// Provider tag reported in chat results.
    fn provider(&self) -> &str;

    /// Model identifier reported in chat results.
    fn model(&self) -> &str;
}

// =============================================================================
// OpenAI wire format
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ResponseChoice>,
    usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl ChatCompletionResponse {
    fn into_completion(self) -> Result<Completion, ProviderError> {
        let usage = self
            .usage
            .ok_or_else(|| ProviderError::MalformedResponse("missing usage".into()))?;
        let reply = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse("no choices in response".into()))?
            .message
            .content
            .ok_or_else(|| ProviderError::MalformedResponse("choice has no content".into()))?;

        Ok(Completion {
            reply,
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            },
        })
    }
}

// =============================================================================
// OpenAiClient
// =============================================================================

/// Completion client for OpenAI-compatible chat APIs.
pub struct OpenAiClient {
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: &[Turn]) -> Result<Completion, ProviderError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        let completion = parsed.into_completion()?;

        tracing::debug!(
            total_tokens = completion.usage.total_tokens,
            "Chat completion received"
        );

        Ok(completion)
    }

    fn provider(&self) -> &str {
        PROVIDER_OPENAI
    }

    fn model(&self) -> &str {
        &self.model
    }
}
