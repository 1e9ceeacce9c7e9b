//! Agent-as-tool adapter

use super::agent::Agent;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use tutor_tools::{Error, Result, Tool, ToolCategory, ToolDefinition, ToolResult};

/// Exposes an agent to another agent as a tool named after it
pub struct DelegateTool {
    agent: Arc<Agent>,
    definition: ToolDefinition,
}

impl DelegateTool {
    /// Wrap an agent
    #[must_use]
    pub fn new(agent: Arc<Agent>) -> Self {
        let definition = ToolDefinition::new(
            agent.name(),
            &agent.spec().description,
            ToolCategory::Delegation,
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "request": {
                    "type": "string",
                    "description": "The question or sub-task for this specialist, with any values it needs"
                }
            },
            "required": ["request"]
        }));

        Self { agent, definition }
    }
}

#[async_trait::async_trait]
impl Tool for DelegateTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let request = input
            .get("request")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidInput("Missing 'request' parameter".to_string()))?;

        debug!(agent = %self.agent.name(), "Delegating request");
        let run = self
            .agent
            .run(&[], request)
            .await
            .map_err(|e| Error::Execution(e.to_string()))?;

        Ok(ToolResult::success(
            serde_json::json!({
                "agent": self.agent.name(),
                "response": run.response,
                "tool_calls": run.tool_calls,
            }),
            start.elapsed().as_millis() as u64,
        ))
    }
}
