//! LLM client module
//!
//! Provides the completion client trait, the chat-completions
//! implementation, and the wire types shared with the pipeline.

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAiClient;
pub use types::{CompletionRequest, FunctionCall, Message, Role, TokenUsage, ToolCall, ToolDefinition};
