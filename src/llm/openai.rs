//! Chat-completions API client implementation
//!
//! Implements the LlmClient trait against any OpenAI-compatible
//! `/chat/completions` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CompletionRequest, LlmClient, LlmError, Message, TokenUsage};
use crate::config::LlmConfig;

/// Chat-completions API client
///
/// One attempt per call: a failed round-trip aborts the invoking loop
/// rather than being retried here, so a degraded endpoint can never
/// multiply the loop's wall-clock beyond `timeout * max_iterations`.
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenAiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build the request body
    ///
    /// Conversation messages are serialized verbatim. When no tools are
    /// registered the tools field is omitted entirely, not sent as an
    /// empty array.
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%request.model, message_count = %request.messages.len(), "build_request_body: called");
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": request.messages,
        });

        if !request.tools.is_empty() {
            debug!("build_request_body: tools not empty, adding tools");
            body["tools"] = serde_json::json!(request.tools.iter().map(|t| t.to_openai_schema()).collect::<Vec<_>>());
            body["tool_choice"] = serde_json::json!("auto");
        } else {
            debug!("build_request_body: no tools");
        }

        body
    }

    /// Extract the assistant turn from the response body
    fn parse_response(&self, api_response: ChatResponse) -> Result<Message, LlmError> {
        debug!(choice_count = %api_response.choices.len(), "parse_response: called");
        if let Some(usage) = api_response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "parse_response: usage"
            );
        }

        api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| LlmError::InvalidResponse("response contained no choices".to_string()))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Message, LlmError> {
        debug!(%request.model, "complete: called");
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        debug!("complete: success");
        let text = response.text().await?;
        let api_response: ChatResponse = serde_json::from_str(&text)?;
        self.parse_response(api_response)
    }
}

// Chat-completions API response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Message,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}
