//! HeartbeatPipeline - the bounded agent loop controller

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message};
use crate::tools::ToolRegistry;

use super::HeartbeatDecision;

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Heartbeat field absent or falsy in a valid JSON object
    HeartbeatFalse,
    /// Assistant content was not a JSON object; returned verbatim
    NonJsonFinal,
    /// Iteration ceiling reached while the agent still signalled continue
    Ceiling,
}

/// Result of one loop invocation
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    /// Final answer: content of the most recently appended message, trimmed
    pub answer: String,

    /// Why the loop stopped
    pub reason: StopReason,

    /// Completion round-trips performed (always <= max_iterations)
    pub rounds: u32,
}

/// Heartbeat-controlled agent pipeline
///
/// The continuation decision is entirely model-controlled - the model
/// embeds its own keep-going signal in each reply - while this controller
/// enforces an inviolable upper bound on completion round-trips. Each
/// invocation owns its conversation exclusively; the registry and
/// configuration are read-only and shared.
pub struct HeartbeatPipeline {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
}

impl HeartbeatPipeline {
    /// Create a new pipeline
    pub fn new(config: Config, llm: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>) -> Self {
        debug!(
            max_iterations = config.pipeline.max_iterations,
            heartbeat_field = %config.pipeline.heartbeat_field,
            tool_count = tools.len(),
            "HeartbeatPipeline::new: called"
        );
        Self { config, llm, tools }
    }

    /// Main entry; returns the final agent answer after the internal loop
    ///
    /// `messages` seeds the conversation (the caller's history); the new
    /// user turn is appended to it. An empty `model_id` falls back to the
    /// configured default model. `body` is the host's opaque request
    /// payload, accepted for interface compatibility.
    pub async fn pipe(
        &self,
        user_message: &str,
        model_id: &str,
        messages: Vec<Message>,
        body: &serde_json::Value,
    ) -> Result<String, LlmError> {
        debug!(%model_id, history_len = messages.len(), "pipe: called");
        let _ = body;
        self.run(user_message, model_id, messages).await.map(|outcome| outcome.answer)
    }

    /// Run the loop and report the full outcome
    pub async fn run(
        &self,
        user_message: &str,
        model_id: &str,
        messages: Vec<Message>,
    ) -> Result<LoopOutcome, LlmError> {
        let model = if model_id.is_empty() {
            self.config.llm.model.clone()
        } else {
            model_id.to_string()
        };

        let max_iterations = self.config.pipeline.max_iterations;
        let heartbeat_field = &self.config.pipeline.heartbeat_field;

        // Local conversation we can mutate freely; rebuilt per invocation,
        // never shared
        let mut convo = messages;
        convo.push(Message::user(user_message));

        let tool_specs = self.tools.specs();

        info!(%model, max_iterations, "run: starting agent loop");

        let mut rounds = 0;
        while rounds < max_iterations {
            rounds += 1;
            debug!(round = rounds, max_iterations, "run: completion round");

            let request = CompletionRequest {
                model: model.clone(),
                messages: convo.clone(),
                tools: tool_specs.clone(),
            };

            // A failed round-trip aborts the whole invocation
            let assistant = self.llm.complete(request).await?;
            convo.push(assistant.clone());

            // Tool-call turns: dispatch each call and append its result
            // before the next completion round. The round still counts
            // against the ceiling, so the termination bound holds no
            // matter how many tools the model chains.
            if assistant.has_tool_calls() {
                let calls = assistant.tool_calls.as_deref().unwrap_or_default();
                debug!(call_count = calls.len(), "run: dispatching tool calls");
                for call in calls {
                    let content = self.tools.dispatch(call).await;
                    convo.push(Message::tool(&call.id, content));
                }
                continue;
            }

            let content = assistant.text().to_string();

            match HeartbeatDecision::parse(&content, heartbeat_field) {
                HeartbeatDecision::Continue => {
                    if rounds == max_iterations {
                        // Ceiling: return the last assistant reply as-is
                        // rather than failing the interaction
                        warn!(rounds, "run: iteration ceiling reached, agent still signalling continue");
                        return Ok(LoopOutcome {
                            answer: content.trim().to_string(),
                            reason: StopReason::Ceiling,
                            rounds,
                        });
                    }
                    // Give the completion API a new turn to respond to
                    // without injecting host-authored content. Convention:
                    // empty user message means "continue".
                    debug!(round = rounds, "run: heartbeat set, continuing");
                    convo.push(Message::user(""));
                }
                HeartbeatDecision::StopClean => {
                    info!(rounds, "run: agent signalled done");
                    return Ok(LoopOutcome {
                        answer: content.trim().to_string(),
                        reason: StopReason::HeartbeatFalse,
                        rounds,
                    });
                }
                HeartbeatDecision::StopNonJson => {
                    info!(rounds, "run: non-JSON final answer");
                    return Ok(LoopOutcome {
                        answer: content.trim().to_string(),
                        reason: StopReason::NonJsonFinal,
                        rounds,
                    });
                }
            }
        }

        // Ceiling hit on a tool round: the most recently appended message
        // is a tool result; return its content
        warn!(rounds, "run: iteration ceiling reached during tool dispatch");
        let last = convo.last().map(|m| m.text()).unwrap_or_default();
        Ok(LoopOutcome {
            answer: last.trim().to_string(),
            reason: StopReason::Ceiling,
            rounds,
        })
    }
}
