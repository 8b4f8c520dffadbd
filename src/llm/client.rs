//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, LlmError, Message};

/// Stateless LLM client - each call is one independent round-trip
///
/// The client performs exactly one request per call: the conversation goes
/// out verbatim, one assistant turn comes back. All loop control lives in
/// the pipeline; all transport concerns live here. No conversation state
/// is kept between calls, which is what lets one invocation own its
/// conversation exclusively.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and return the assistant turn
    async fn complete(&self, request: CompletionRequest) -> Result<Message, LlmError>;
}
