//! ToolRegistry - holds tools and dispatches model-requested invocations

use serde_json::Value;
use tracing::debug;

use crate::llm::{ToolCall, ToolDefinition};

use super::builtin::{CalculateTool, FetchUrlTool, ServerTimeTool};
use super::{Tool, ToolError, ToolResult};

/// Holds the callable tools for a pipeline
///
/// Tools are kept in declaration order so the derived definitions are
/// deterministic across invocations. The registry is read-only during the
/// loop and safe to share between concurrent invocations.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry with the standard example tools
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register(Box::new(ServerTimeTool));
        registry.register(Box::new(FetchUrlTool::new()));
        registry.register(Box::new(CalculateTool));

        registry
    }

    /// Add a tool to the registry
    ///
    /// Re-registering a name replaces the tool in place, keeping its
    /// original position in the declaration order.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        debug!(name = %tool.name(), "ToolRegistry::register: called");
        if let Some(slot) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            *slot = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// Get tool definitions for the completion request, in declaration order
    pub fn specs(&self) -> Vec<ToolDefinition> {
        debug!(tool_count = %self.tools.len(), "ToolRegistry::specs: called");
        self.tools
            .iter()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    /// Whether no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Invoke a tool by name after validating params against its schema
    pub async fn invoke(&self, name: &str, params: &Value) -> Result<ToolResult, ToolError> {
        debug!(%name, "ToolRegistry::invoke: called");
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ToolError::UnknownTool { name: name.to_string() })?;

        validate_input(name, &tool.input_schema(), params)?;

        Ok(tool.execute(params.clone()).await)
    }

    /// Execute a model-requested tool call, rendering any failure as a
    /// descriptive string
    ///
    /// The returned string becomes the content of the `role: tool` message
    /// fed back into the conversation; dispatch failures never terminate
    /// the loop.
    pub async fn dispatch(&self, call: &ToolCall) -> String {
        debug!(name = %call.function.name, id = %call.id, "ToolRegistry::dispatch: called");
        match self.invoke(&call.function.name, &call.parsed_arguments()).await {
            Ok(result) => {
                debug!(is_error = %result.is_error, "ToolRegistry::dispatch: tool executed");
                result.content
            }
            Err(e) => {
                debug!(error = %e, "ToolRegistry::dispatch: dispatch failed");
                e.to_string()
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Validate a parameter object against a tool's declared JSON schema
///
/// Checks the three failure modes the schema can express: non-object
/// input, missing required fields, and declared-type mismatches. Unknown
/// extra parameters are ignored, matching what the endpoints themselves
/// tolerate.
fn validate_input(name: &str, schema: &Value, params: &Value) -> Result<(), ToolError> {
    debug!(%name, "validate_input: called");
    let Some(params_map) = params.as_object() else {
        return Err(ToolError::InvalidParams {
            name: name.to_string(),
            reason: format!("expected a parameter object, got {}", json_type_name(params)),
        });
    };

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for field in required.iter().filter_map(|f| f.as_str()) {
            if !params_map.contains_key(field) {
                return Err(ToolError::InvalidParams {
                    name: name.to_string(),
                    reason: format!("missing required parameter '{}'", field),
                });
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(|p| p.as_object()) else {
        return Ok(());
    };

    for (key, value) in params_map {
        let Some(declared) = properties.get(key).and_then(|p| p.get("type")).and_then(|t| t.as_str()) else {
            continue;
        };

        if !type_matches(declared, value) {
            return Err(ToolError::InvalidParams {
                name: name.to_string(),
                reason: format!(
                    "parameter '{}' expected type {}, got {}",
                    key,
                    declared,
                    json_type_name(value)
                ),
            });
        }
    }

    Ok(())
}

/// Check a JSON value against a JSON-schema primitive type name
fn type_matches(declared: &str, value: &Value) -> bool {
    match declared {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // Unknown declared type: let the tool decide
        _ => true,
    }
}

/// Human-readable name of a JSON value's type, for error messages
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echo the given text back"
        }

        fn input_schema(&self) -> Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "description": "Text to echo" }
                },
                "required": ["text"]
            })
        }

        async fn execute(&self, input: Value) -> ToolResult {
            ToolResult::success(format!("You said: {}", input["text"].as_str().unwrap_or_default()))
        }
    }

    #[test]
    fn test_standard_registry_has_example_tools() {
        let registry = ToolRegistry::standard();

        assert!(registry.has_tool("get_server_time"));
        assert!(registry.has_tool("fetch_url"));
        assert!(registry.has_tool("calculate"));
    }

    #[test]
    fn test_specs_preserve_declaration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(CalculateTool));
        registry.register(Box::new(EchoTool));
        registry.register(Box::new(ServerTimeTool));

        let names: Vec<String> = registry.specs().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["calculate", "echo", "get_server_time"]);
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        registry.register(Box::new(CalculateTool));
        registry.register(Box::new(EchoTool));

        assert_eq!(registry.len(), 2);
        let names: Vec<String> = registry.specs().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["echo", "calculate"]);
    }

    #[test]
    fn test_empty_registry_has_no_specs() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.specs().is_empty());
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();

        let result = registry.invoke("teleport", &serde_json::json!({})).await;

        assert!(matches!(result, Err(ToolError::UnknownTool { .. })));
    }

    #[tokio::test]
    async fn test_invoke_missing_required_param() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let result = registry.invoke("echo", &serde_json::json!({})).await;

        match result {
            Err(ToolError::InvalidParams { reason, .. }) => {
                assert!(reason.contains("'text'"));
            }
            other => panic!("Expected InvalidParams, got {:?}", other.map(|r| r.content)),
        }
    }

    #[tokio::test]
    async fn test_invoke_wrong_param_type() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let result = registry.invoke("echo", &serde_json::json!({"text": 42})).await;

        match result {
            Err(ToolError::InvalidParams { reason, .. }) => {
                assert!(reason.contains("expected type string"));
            }
            other => panic!("Expected InvalidParams, got {:?}", other.map(|r| r.content)),
        }
    }

    #[tokio::test]
    async fn test_invoke_non_object_params() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let result = registry.invoke("echo", &serde_json::json!("just a string")).await;

        assert!(matches!(result, Err(ToolError::InvalidParams { .. })));
    }

    #[tokio::test]
    async fn test_invoke_valid_params() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let result = registry.invoke("echo", &serde_json::json!({"text": "hello"})).await.unwrap();

        assert!(!result.is_error);
        assert_eq!(result.content, "You said: hello");
    }

    #[tokio::test]
    async fn test_dispatch_renders_failure_as_content() {
        let registry = ToolRegistry::new();
        let call = ToolCall::function("call_1", "teleport", &serde_json::json!({}));

        let content = registry.dispatch(&call).await;

        assert_eq!(content, "Unknown tool: teleport");
    }

    #[tokio::test]
    async fn test_dispatch_malformed_arguments_report_missing_fields() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        // Malformed argument JSON parses to {} and fails required-field
        // validation instead of crashing the loop
        let call = ToolCall {
            id: "call_1".to_string(),
            call_type: "function".to_string(),
            function: crate::llm::FunctionCall {
                name: "echo".to_string(),
                arguments: "{broken".to_string(),
            },
        };

        let content = registry.dispatch(&call).await;

        assert!(content.contains("missing required parameter"));
    }

    #[test]
    fn test_type_matches_integer_vs_number() {
        assert!(type_matches("number", &serde_json::json!(1.5)));
        assert!(type_matches("number", &serde_json::json!(2)));
        assert!(type_matches("integer", &serde_json::json!(2)));
        assert!(!type_matches("integer", &serde_json::json!(1.5)));
    }
}
