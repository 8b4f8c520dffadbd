//! calculate tool - basic arithmetic

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::{Tool, ToolResult};

/// Perform a basic arithmetic operation on two numbers
pub struct CalculateTool;

#[async_trait]
impl Tool for CalculateTool {
    fn name(&self) -> &'static str {
        "calculate"
    }

    fn description(&self) -> &'static str {
        "Perform a basic arithmetic operation (add, subtract, multiply, divide) on two numbers."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "description": "One of: add, subtract, multiply, divide"
                },
                "a": {
                    "type": "number",
                    "description": "The first number."
                },
                "b": {
                    "type": "number",
                    "description": "The second number."
                }
            },
            "required": ["operation", "a", "b"]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult {
        let operation = input["operation"].as_str().unwrap_or_default();
        let a = input["a"].as_f64().unwrap_or_default();
        let b = input["b"].as_f64().unwrap_or_default();

        match operation {
            "add" => ToolResult::success(format!("The sum of {} and {} is {}", a, b, a + b)),
            "subtract" => ToolResult::success(format!("The difference between {} and {} is {}", a, b, a - b)),
            "multiply" => ToolResult::success(format!("The product of {} and {} is {}", a, b, a * b)),
            "divide" => {
                if b == 0.0 {
                    ToolResult::error("Cannot divide by zero")
                } else {
                    ToolResult::success(format!("The quotient of {} and {} is {}", a, b, a / b))
                }
            }
            other => ToolResult::error(format!("Unknown operation: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add() {
        let tool = CalculateTool;

        let result = tool
            .execute(serde_json::json!({"operation": "add", "a": 2, "b": 3}))
            .await;

        assert!(!result.is_error);
        assert_eq!(result.content, "The sum of 2 and 3 is 5");
    }

    #[tokio::test]
    async fn test_divide() {
        let tool = CalculateTool;

        let result = tool
            .execute(serde_json::json!({"operation": "divide", "a": 9, "b": 2}))
            .await;

        assert!(!result.is_error);
        assert_eq!(result.content, "The quotient of 9 and 2 is 4.5");
    }

    #[tokio::test]
    async fn test_divide_by_zero() {
        let tool = CalculateTool;

        let result = tool
            .execute(serde_json::json!({"operation": "divide", "a": 1, "b": 0}))
            .await;

        assert!(result.is_error);
        assert_eq!(result.content, "Cannot divide by zero");
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let tool = CalculateTool;

        let result = tool
            .execute(serde_json::json!({"operation": "modulo", "a": 5, "b": 3}))
            .await;

        assert!(result.is_error);
        assert!(result.content.contains("Unknown operation: modulo"));
    }
}
