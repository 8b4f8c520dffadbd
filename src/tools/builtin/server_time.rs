//! get_server_time tool - report the server clock

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::tools::{Tool, ToolResult};

/// Report the current UTC time on the server
pub struct ServerTimeTool;

#[async_trait]
impl Tool for ServerTimeTool {
    fn name(&self) -> &'static str {
        "get_server_time"
    }

    fn description(&self) -> &'static str {
        "Get the current UTC time on the server in ISO-8601 format."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value) -> ToolResult {
        ToolResult::success(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_time_is_iso8601_utc() {
        let tool = ServerTimeTool;

        let result = tool.execute(serde_json::json!({})).await;

        assert!(!result.is_error);
        assert!(result.content.ends_with('Z'), "should be UTC: {}", result.content);
        assert!(
            chrono::DateTime::parse_from_rfc3339(&result.content).is_ok(),
            "should parse as RFC 3339: {}",
            result.content
        );
    }
}
