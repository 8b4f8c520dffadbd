//! Heartbeat decision parsing over untrusted assistant output

use serde_json::Value;
use tracing::debug;

/// Continuation decision derived from one assistant turn
///
/// The assistant is expected to finish every turn with a single JSON
/// object; the configured heartbeat field inside that object decides
/// whether the loop continues. Content that is not a JSON object is a
/// defined terminal state, not an error - it is treated as the final
/// answer verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatDecision {
    /// Heartbeat field present and truthy - the agent wants another round
    Continue,
    /// Valid JSON object, heartbeat absent or falsy - the agent is done
    StopClean,
    /// Content is not a JSON object - treated as the final answer
    StopNonJson,
}

impl HeartbeatDecision {
    /// Parse assistant content and test the configured heartbeat field
    ///
    /// Truthiness follows the loose convention the protocol inherited:
    /// `false`, `null`, `0`, and `""` are falsy, everything else is truthy.
    pub fn parse(content: &str, heartbeat_field: &str) -> Self {
        debug!(%heartbeat_field, content_len = content.len(), "HeartbeatDecision::parse: called");
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => match map.get(heartbeat_field) {
                Some(value) if is_truthy(value) => {
                    debug!("HeartbeatDecision::parse: heartbeat truthy, continuing");
                    HeartbeatDecision::Continue
                }
                _ => {
                    debug!("HeartbeatDecision::parse: heartbeat absent or falsy, stopping");
                    HeartbeatDecision::StopClean
                }
            },
            Ok(_) => {
                debug!("HeartbeatDecision::parse: JSON but not an object, stopping");
                HeartbeatDecision::StopNonJson
            }
            Err(_) => {
                debug!("HeartbeatDecision::parse: not JSON, stopping");
                HeartbeatDecision::StopNonJson
            }
        }
    }

    /// Whether the loop should run another round
    pub fn should_continue(&self) -> bool {
        matches!(self, HeartbeatDecision::Continue)
    }
}

/// Loose truthiness over a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
