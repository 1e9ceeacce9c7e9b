//! Registry - Tool registration and discovery
//!
//! Tools are registered once at startup and looked up by name when an
//! agent requests a call. Each agent gets its own registry holding only
//! the tools it is allowed to use.

use crate::error::{Error, Result};
use crate::outcome::ToolOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Tool category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    /// Arithmetic
    Math,
    /// Physical constants
    Physics,
    /// Periodic table
    Chemistry,
    /// Web search
    Search,
    /// Hands a request to another agent
    Delegation,
}

impl ToolCategory {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Physics => "physics",
            Self::Chemistry => "chemistry",
            Self::Search => "search",
            Self::Delegation => "delegation",
        }
    }
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tool metadata and schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name
    pub name: String,
    /// Human-readable description (shown to the model)
    pub description: String,
    /// JSON schema for parameters
    pub parameters: serde_json::Value,
    /// Tool category
    pub category: ToolCategory,
}

impl ToolDefinition {
    /// Create a new tool definition
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: ToolCategory,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
            category,
        }
    }

    /// Set the parameters schema
    #[must_use]
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether execution succeeded
    pub success: bool,
    /// Output data
    pub output: serde_json::Value,
    /// Error message if failed
    pub error: Option<String>,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
}

impl ToolResult {
    /// Create a successful result
    #[must_use]
    pub fn success(output: serde_json::Value, duration_ms: u64) -> Self {
        Self {
            success: true,
            output,
            error: None,
            duration_ms,
        }
    }

    /// Create a failed result
    #[must_use]
    pub fn failure(error: impl Into<String>, duration_ms: u64) -> Self {
        let error = error.into();
        Self {
            success: false,
            output: serde_json::json!({"status": "error", "result": error}),
            error: Some(error),
            duration_ms,
        }
    }

    /// Wrap a deterministic tool outcome. The wire form becomes the output
    /// either way so the model always sees the full payload.
    #[must_use]
    pub fn from_outcome<T: Serialize>(outcome: &ToolOutcome<T>, duration_ms: u64) -> Self {
        Self {
            success: outcome.is_success(),
            output: outcome.to_value(),
            error: outcome.failure().map(|f| f.message.clone()),
            duration_ms,
        }
    }
}

/// Trait for tool implementations
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with given input
    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult>;

    /// Validate input before execution
    fn validate_input(&self, input: &serde_json::Value) -> Result<()> {
        if !input.is_object() {
            return Err(Error::InvalidInput("Input must be an object".to_string()));
        }
        Ok(())
    }
}

/// Registry for managing tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.definition().name.clone();
        debug!(tool = %name, "Registering tool");
        self.tools.insert(name, tool);
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names, sorted
    #[must_use]
    pub fn list_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// List all tool definitions, sorted by name
    #[must_use]
    pub fn list_definitions(&self) -> Vec<&ToolDefinition> {
        let mut defs: Vec<&ToolDefinition> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Copy the named tools into a new registry. Unknown names are skipped.
    #[must_use]
    pub fn subset(&self, names: &[&str]) -> Self {
        let tools = names
            .iter()
            .filter_map(|name| self.tools.get(*name).map(|t| ((*name).to_string(), t.clone())))
            .collect();
        Self { tools }
    }

    /// Get tool count
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Convert definitions to LLM tool format
    #[must_use]
    pub fn to_llm_tools(&self) -> Vec<tutor_llm::ToolDefinition> {
        self.list_definitions()
            .into_iter()
            .map(|def| {
                tutor_llm::ToolDefinition::new(&def.name, &def.description, def.parameters.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;

    #[test]
    fn test_tool_definition_builder() {
        let def = ToolDefinition::new("calculator", "Arithmetic", ToolCategory::Math)
            .with_parameters(serde_json::json!({"type": "object"}));

        assert_eq!(def.name, "calculator");
        assert_eq!(def.category, ToolCategory::Math);

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["category"], "math");
        assert!(value.get("enabled").is_none());
    }

    #[test]
    fn test_tool_result_failure_has_error_payload() {
        let result = ToolResult::failure("boom", 3);
        assert!(!result.success);
        assert_eq!(result.output["status"], "error");
        assert_eq!(result.output["result"], "boom");
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_tool_result_from_outcome() {
        let outcome: ToolOutcome<serde_json::Value> = ToolOutcome::error("Cannot divide by zero.");
        let result = ToolResult::from_outcome(&outcome, 0);
        assert!(!result.success);
        assert_eq!(result.output["result"], "Cannot divide by zero.");
    }

    #[test]
    fn test_registry_lists_sorted() {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry);

        assert_eq!(
            registry.list_names(),
            vec![
                "calculator",
                "elements_lookup",
                "lookup_physics_constant",
                "web_search"
            ]
        );
        assert_eq!(registry.to_llm_tools().len(), 4);
    }

    #[test]
    fn test_registry_subset() {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry);

        let maths = registry.subset(&["calculator", "no_such_tool"]);
        assert_eq!(maths.len(), 1);
        assert!(maths.has("calculator"));
        assert!(!maths.has("elements_lookup"));
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(ToolCategory::Delegation.as_str(), "delegation");
        assert_eq!(ToolCategory::Chemistry.to_string(), "chemistry");
    }
}
