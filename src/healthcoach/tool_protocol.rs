//! Tool Protocol Abstraction Layer
//!
//! The surface an external agent runtime talks to. A runtime discovers tools through
//! [`ToolProtocol::list_tools`], renders them into function declarations with
//! [`ToolMetadata::to_function_schema`], and forwards the model's calls (tool name +
//! JSON arguments) to [`ToolProtocol::execute`].
//!
//! # Architecture
//!
//! ```text
//! Agent runtime → ToolRegistry → ToolProtocol (trait) → SessionToolProtocol → SessionStore
//! ```
//!
//! # Example
//!
//! ```rust
//! use healthcoach::tool_protocol::{ToolMetadata, ToolParameter, ToolParameterType};
//!
//! let metadata = ToolMetadata::new("log_water_intake", "Log water intake")
//!     .with_parameter(
//!         ToolParameter::new("amount_ml", ToolParameterType::Integer)
//!             .with_description("Amount of water in milliliters")
//!             .required(),
//!     );
//!
//! let schema = metadata.to_function_schema();
//! assert_eq!(schema["parameters"]["required"][0], "amount_ml");
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Represents the result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool accepted its input
    pub success: bool,
    /// The tool's reply; session tools always answer with a JSON string
    pub output: serde_json::Value,
    /// Why the call failed, when it did
    pub error: Option<String>,
    /// Metadata about the execution (session id, etc.)
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ToolResult {
    /// Create a successful result carrying `output`.
    pub fn success(output: serde_json::Value) -> Self {
        Self {
            success: true,
            output,
            error: None,
            metadata: HashMap::new(),
        }
    }

    /// Create a failed result with an error message and no output.
    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            output: serde_json::Value::Null,
            error: Some(error),
            metadata: HashMap::new(),
        }
    }

    /// Attach application specific metadata to the result.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The text to hand back to the model: the output string on success, the error
    /// message otherwise.
    pub fn reply_text(&self) -> String {
        match (&self.output, &self.error) {
            (serde_json::Value::String(text), _) => text.clone(),
            (_, Some(error)) => error.clone(),
            (serde_json::Value::Null, None) => String::new(),
            (other, None) => other.to_string(),
        }
    }
}

/// JSON-schema type of a tool parameter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToolParameterType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// Defines a parameter for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ToolParameterType,
    pub description: Option<String>,
    pub required: bool,
    pub default: Option<serde_json::Value>,
    /// Closed set of accepted values, rendered as a JSON-schema `enum`
    pub allowed_values: Option<Vec<String>>,
}

impl ToolParameter {
    /// Create an optional parameter with no description.
    pub fn new(name: impl Into<String>, param_type: ToolParameterType) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: None,
            required: false,
            default: None,
            allowed_values: None,
        }
    }

    /// Describe the parameter for the model.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Default value the model may omit the parameter in favour of.
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Restrict the parameter to a closed set of values.
    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    fn to_property_schema(&self) -> serde_json::Value {
        let mut property = serde_json::Map::new();
        property.insert("type".to_string(), serde_json::json!(self.param_type));
        if let Some(description) = &self.description {
            property.insert("description".to_string(), serde_json::json!(description));
        }
        if let Some(values) = &self.allowed_values {
            property.insert("enum".to_string(), serde_json::json!(values));
        }
        if let Some(default) = &self.default {
            property.insert("default".to_string(), default.clone());
        }
        serde_json::Value::Object(property)
    }
}

/// Metadata about a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl ToolMetadata {
    /// Create metadata for a tool that takes no parameters yet.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter definition.
    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Render as a function declaration in the shape OpenAI- and Gemini-style
    /// function-calling APIs accept.
    pub fn to_function_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for param in &self.parameters {
            properties.insert(param.name.clone(), param.to_property_schema());
            if param.required {
                required.push(param.name.clone());
            }
        }

        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required
            }
        })
    }
}

/// Trait for implementing tool execution protocols
#[async_trait]
pub trait ToolProtocol: Send + Sync {
    /// Execute a tool with the given parameters
    async fn execute(
        &self,
        tool_name: &str,
        parameters: serde_json::Value,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>>;

    /// Get metadata about available tools
    async fn list_tools(&self) -> Result<Vec<ToolMetadata>, Box<dyn Error + Send + Sync>>;

    /// Get metadata about a specific tool
    async fn get_tool_metadata(
        &self,
        tool_name: &str,
    ) -> Result<ToolMetadata, Box<dyn Error + Send + Sync>>;

    /// Protocol identifier (e.g. "session")
    fn protocol_name(&self) -> &str;
}

/// Error types for tool operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Requested tool is not registered in the current registry/protocol.
    #[error("Tool not found: {0}")]
    NotFound(String),
    /// Tool execution completed with an application level failure.
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
    /// The provided JSON parameters failed validation or deserialization.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    /// A lower level protocol error occurred.
    #[error("Protocol error: {0}")]
    ProtocolError(String),
}

/// A tool bound to the protocol that executes it
pub struct Tool {
    metadata: ToolMetadata,
    protocol: Arc<dyn ToolProtocol>,
}

impl Tool {
    /// Bind tool metadata to the protocol that executes it.
    pub fn new(metadata: ToolMetadata, protocol: Arc<dyn ToolProtocol>) -> Self {
        Self { metadata, protocol }
    }

    /// The tool's metadata.
    pub fn metadata(&self) -> &ToolMetadata {
        &self.metadata
    }

    /// Execute the tool through its protocol.
    pub async fn execute(
        &self,
        parameters: serde_json::Value,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>> {
        self.protocol.execute(&self.metadata.name, parameters).await
    }
}

/// Registry of the tools available to an agent
///
/// Tools are kept in name order so that listings and rendered schemas are stable
/// from one call to the next.
pub struct ToolRegistry {
    tools: BTreeMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry with no tools.
    pub fn empty() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Build a registry holding every tool the protocol advertises.
    pub async fn from_protocol(
        protocol: Arc<dyn ToolProtocol>,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let mut registry = Self::empty();
        for metadata in protocol.list_tools().await? {
            registry.add_tool(Tool::new(metadata, protocol.clone()));
        }
        log::debug!(
            "registered {} tools from protocol '{}'",
            registry.tools.len(),
            protocol.protocol_name()
        );
        Ok(registry)
    }

    /// Insert or replace a tool definition.
    pub fn add_tool(&mut self, tool: Tool) {
        self.tools.insert(tool.metadata.name.clone(), tool);
    }

    /// Remove a tool by name, returning it if it was registered.
    pub fn remove_tool(&mut self, name: &str) -> Option<Tool> {
        self.tools.remove(name)
    }

    /// Look up a tool by name.
    pub fn get_tool(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Metadata for registered tools, in name order.
    pub fn list_tools(&self) -> Vec<&ToolMetadata> {
        self.tools.values().map(|t| &t.metadata).collect()
    }

    /// Function declarations for every registered tool, in name order.
    pub fn function_schemas(&self) -> Vec<serde_json::Value> {
        self.tools
            .values()
            .map(|t| t.metadata.to_function_schema())
            .collect()
    }

    /// Execute a named tool with serialized parameters.
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: serde_json::Value,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::NotFound(tool_name.to_string()))?;

        tool.execute(parameters).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProtocol;

    #[async_trait]
    impl ToolProtocol for EchoProtocol {
        async fn execute(
            &self,
            tool_name: &str,
            parameters: serde_json::Value,
        ) -> Result<ToolResult, Box<dyn Error + Send + Sync>> {
            Ok(ToolResult::success(serde_json::json!({
                "tool": tool_name,
                "echo": parameters
            })))
        }

        async fn list_tools(&self) -> Result<Vec<ToolMetadata>, Box<dyn Error + Send + Sync>> {
            Ok(vec![
                ToolMetadata::new("zeta", "Last alphabetically"),
                ToolMetadata::new("alpha", "First alphabetically"),
            ])
        }

        async fn get_tool_metadata(
            &self,
            tool_name: &str,
        ) -> Result<ToolMetadata, Box<dyn Error + Send + Sync>> {
            Ok(ToolMetadata::new(tool_name, "Echo"))
        }

        fn protocol_name(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_tool_parameter_builder() {
        let param = ToolParameter::new("intensity", ToolParameterType::String)
            .with_description("How hard the session was")
            .required()
            .with_allowed_values(["low", "high"])
            .with_default(serde_json::json!("low"));

        assert_eq!(param.name, "intensity");
        assert_eq!(param.param_type, ToolParameterType::String);
        assert!(param.required);
        assert_eq!(
            param.allowed_values,
            Some(vec!["low".to_string(), "high".to_string()])
        );
    }

    #[test]
    fn test_function_schema_rendering() {
        let schema = ToolMetadata::new("log_workout", "Log a workout")
            .with_parameter(
                ToolParameter::new("intensity", ToolParameterType::String)
                    .with_allowed_values(["low", "moderate"])
                    .required(),
            )
            .with_parameter(ToolParameter::new("notes", ToolParameterType::String))
            .to_function_schema();

        assert_eq!(schema["name"], "log_workout");
        assert_eq!(schema["parameters"]["type"], "object");
        assert_eq!(
            schema["parameters"]["properties"]["intensity"]["enum"],
            serde_json::json!(["low", "moderate"])
        );
        assert_eq!(
            schema["parameters"]["properties"]["notes"]["type"],
            "string"
        );
        assert_eq!(schema["parameters"]["required"], serde_json::json!(["intensity"]));
    }

    #[test]
    fn test_reply_text_prefers_output_string() {
        let ok = ToolResult::success(serde_json::json!("Logged 250ml"));
        assert_eq!(ok.reply_text(), "Logged 250ml");

        let failed = ToolResult::failure("Error: bad".to_string());
        assert_eq!(failed.reply_text(), "Error: bad");
    }

    #[tokio::test]
    async fn test_registry_from_protocol_is_name_ordered() {
        let registry = ToolRegistry::from_protocol(Arc::new(EchoProtocol))
            .await
            .unwrap();

        let names: Vec<&str> = registry
            .list_tools()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(registry.function_schemas().len(), 2);

        let result = registry
            .execute_tool("zeta", serde_json::json!({"x": 1}))
            .await
            .unwrap();
        assert_eq!(result.output["tool"], "zeta");
    }

    #[tokio::test]
    async fn test_registry_unknown_tool() {
        let registry = ToolRegistry::empty();
        let err = registry
            .execute_tool("missing", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Tool not found: missing");
    }
}
