//! Tool error types

use thiserror::Error;

/// Errors that can occur during tool dispatch
///
/// These surface back into the conversation as descriptive strings rather
/// than terminating the loop, so the agent can react to its own mistakes.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid parameters for {name}: {reason}")]
    InvalidParams { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_message() {
        let err = ToolError::UnknownTool {
            name: "teleport".to_string(),
        };

        assert_eq!(err.to_string(), "Unknown tool: teleport");
    }

    #[test]
    fn test_invalid_params_message() {
        let err = ToolError::InvalidParams {
            name: "calculate".to_string(),
            reason: "missing required parameter 'a'".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("calculate"));
        assert!(msg.contains("'a'"));
    }
}
