//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// A tool that can be called by the LLM
///
/// Side effects (network fetch, clock read) are the tool's own
/// responsibility; the registry neither retries nor guards them.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the name in the model's tool call)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn execute(&self, input: Value) -> ToolResult;
}

/// Result of a tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("2024-01-01T00:00:00Z");
        assert!(!result.is_error);
        assert_eq!(result.content, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("Cannot divide by zero");
        assert!(result.is_error);
        assert_eq!(result.content, "Cannot divide by zero");
    }
}
