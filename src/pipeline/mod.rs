//! Heartbeat agent loop
//!
//! The pipeline repeatedly asks the completion client for the next
//! assistant turn, dispatches any requested tool calls, and parses the
//! turn's content for the continuation signal - bounded by the configured
//! iteration ceiling.

mod decision;
mod heartbeat;

pub use decision::HeartbeatDecision;
pub use heartbeat::{HeartbeatPipeline, LoopOutcome, StopReason};
