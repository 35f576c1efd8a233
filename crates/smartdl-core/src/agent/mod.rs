//! Agent-facing tool surface.
//!
//! Tools take a flat JSON object of arguments and always answer with a
//! [`ToolResult`]; failures are reported in the result, never raised.

mod download;
mod list;

pub use download::DownloadAgent;
pub use list::{format_size, list_files, FileEntry};

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Structured answer of one tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub success: bool,
    pub data: Value,
    pub message: Option<String>,
    pub warnings: Vec<String>,
    pub metadata: Value,
}

impl ToolResult {
    pub fn success(data: Value, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
            warnings: Vec::new(),
            metadata: Value::Object(Map::new()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            message: Some(message.into()),
            warnings: Vec::new(),
            metadata: Value::Object(Map::new()),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Name, description and JSON-schema parameters of a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Object schema with the given properties and required names.
pub fn json_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Something that exposes tools to a chat model.
pub trait Agent {
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Runs tool `name`. Unknown names and bad arguments are error results.
    fn execute_tool(&self, name: &str, arguments: &Value) -> ToolResult;

    fn metadata(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_shape() {
        let schema = json_schema(json!({"url": {"type": "string"}}), &["url"]);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["url"]));
        assert_eq!(schema["properties"]["url"]["type"], "string");
    }

    #[test]
    fn result_serializes_all_fields() {
        let value = serde_json::to_value(ToolResult::error("nope")).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "data": null,
                "message": "nope",
                "warnings": [],
                "metadata": {},
            })
        );
    }
}
