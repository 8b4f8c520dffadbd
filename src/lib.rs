//! Pulseline - Heartbeat-Controlled Agent Pipeline
//!
//! Pulseline wraps a chat-completion endpoint in a bounded autonomous agent
//! loop. After each assistant reply the pipeline checks for a *heartbeat*
//! flag embedded in the model's JSON output. If the model sets
//! `{"heartbeat": true}` the conversation continues for another round; the
//! pipeline enforces a hard iteration ceiling so the loop can never run
//! forever.
//!
//! # Core Concepts
//!
//! - **Model-Controlled Continuation**: The agent decides per-turn whether
//!   to keep going by embedding the heartbeat flag in its own output
//! - **Host-Enforced Ceiling**: Max iterations bounds completion round-trips
//!   regardless of what the model reports
//! - **Stateless Invocations**: Every call rebuilds the conversation from
//!   the caller-supplied history, so invocations scale horizontally
//! - **Tools Over Side Effects**: The model touches the outside world only
//!   through registered tools with declared parameter schemas
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait and chat-completions implementation
//! - [`tools`] - Tool registry, parameter validation, builtin tools
//! - [`pipeline`] - The heartbeat loop controller
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod tools;

// Re-export commonly used types
pub use config::{Config, LlmConfig, PipelineConfig};
pub use llm::{CompletionRequest, LlmClient, LlmError, Message, OpenAiClient, Role, ToolCall, ToolDefinition};
pub use pipeline::{HeartbeatDecision, HeartbeatPipeline, LoopOutcome, StopReason};
pub use tools::{Tool, ToolError, ToolRegistry, ToolResult};
