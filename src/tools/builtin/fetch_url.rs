//! fetch_url tool - retrieve plain-text content from a URL

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::tools::{Tool, ToolResult};

/// Maximum number of characters returned to the model
const MAX_BODY_CHARS: usize = 8_000;

/// Fetch plain-text content from a URL with GET
pub struct FetchUrlTool {
    http: reqwest::Client,
}

impl FetchUrlTool {
    /// Create the tool with its own short-timeout HTTP client
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();

        Self { http }
    }
}

impl Default for FetchUrlTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FetchUrlTool {
    fn name(&self) -> &'static str {
        "fetch_url"
    }

    fn description(&self) -> &'static str {
        "Retrieve plain-text content from a URL (GET)."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "Fully qualified URL to download"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult {
        let url = match input["url"].as_str() {
            Some(u) => u,
            None => return ToolResult::error("url is required"),
        };

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return ToolResult::error("URL must start with http:// or https://");
        }

        let response = match self.http.get(url).send().await {
            Ok(r) => r,
            Err(e) => return ToolResult::error(format!("Failed to fetch URL: {}", e)),
        };

        if !response.status().is_success() {
            return ToolResult::error(format!("HTTP error: {}", response.status()));
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return ToolResult::error(format!("Failed to read response: {}", e)),
        };

        // Safeguard: trim very long bodies
        if body.chars().count() > MAX_BODY_CHARS {
            return ToolResult::success(body.chars().take(MAX_BODY_CHARS).collect::<String>());
        }

        ToolResult::success(body)
    }
}
