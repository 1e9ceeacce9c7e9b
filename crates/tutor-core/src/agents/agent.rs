//! Generic tool-calling agent loop

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use tutor_llm::{
    CompletionRequest, LlmProvider, Message, ToolCall, ToolCompletionRequest, ToolDefinition,
};
use tutor_tools::{RunnerConfig, ToolRegistry, ToolRunner};

/// Static description of an agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSpec {
    /// Agent name; also the tool name when delegated to
    pub name: String,
    /// One-line description shown to a delegating agent
    pub description: String,
    /// System instruction
    pub instruction: String,
    /// Names of the tools the agent may call
    pub tools: Vec<String>,
}

impl AgentSpec {
    /// Create a new spec
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            instruction: instruction.into(),
            tools: Vec::new(),
        }
    }

    /// Add a tool the agent may call
    #[must_use]
    pub fn with_tool(mut self, name: impl Into<String>) -> Self {
        self.tools.push(name.into());
        self
    }
}

/// Model and loop settings for an agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Model name; empty uses the provider default
    pub model: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Output token cap
    pub max_tokens: Option<u32>,
    /// Maximum model turns per run
    pub max_iterations: usize,
    /// Timeouts for the agent's tools
    pub runner_config: RunnerConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: None,
            max_tokens: None,
            max_iterations: 5,
            runner_config: RunnerConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Set maximum iterations
    #[must_use]
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the tool runner configuration
    #[must_use]
    pub fn with_runner_config(mut self, config: RunnerConfig) -> Self {
        self.runner_config = config;
        self
    }
}

/// Record of a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Agent that made the call
    pub agent: String,
    /// Tool name
    pub tool_name: String,
    /// Input arguments
    pub input: serde_json::Value,
    /// Output payload as the model saw it
    pub output: serde_json::Value,
    /// Whether it succeeded
    pub success: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Outcome of one agent run
#[derive(Debug, Clone)]
pub struct AgentRun {
    /// Final text (empty if the model never produced any)
    pub response: String,
    /// Tool calls made by this agent, in call order
    pub tool_calls: Vec<ToolCallRecord>,
    /// Model turns used
    pub iterations: usize,
    /// Model reported by the provider
    pub model: String,
}

/// An LLM agent with its own tool set
pub struct Agent {
    spec: AgentSpec,
    provider: Arc<dyn LlmProvider>,
    runner: ToolRunner,
    tools: Vec<ToolDefinition>,
    config: AgentConfig,
}

impl Agent {
    /// Create an agent over the subset of `registry` named in its spec
    #[must_use]
    pub fn new(
        spec: AgentSpec,
        provider: Arc<dyn LlmProvider>,
        registry: &ToolRegistry,
        config: AgentConfig,
    ) -> Self {
        let names: Vec<&str> = spec.tools.iter().map(String::as_str).collect();
        let own = registry.subset(&names);
        if own.len() != names.len() {
            warn!(agent = %spec.name, wanted = ?names, found = own.len(), "Some agent tools are not registered");
        }
        let tools = own.to_llm_tools();
        let runner = ToolRunner::new(Arc::new(own), config.runner_config.clone());

        Self {
            spec,
            provider,
            runner,
            tools,
            config,
        }
    }

    /// Agent name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Agent spec
    #[must_use]
    pub fn spec(&self) -> &AgentSpec {
        &self.spec
    }

    /// Agent config
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Names of the tools this agent can call, sorted
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name.clone()).collect()
    }

    /// Run the loop for one request on top of earlier conversation turns.
    #[instrument(skip(self, history, request), fields(agent = %self.spec.name))]
    pub async fn run(&self, history: &[Message], request: &str) -> Result<AgentRun> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(&self.spec.instruction));
        messages.extend(history.iter().cloned());
        messages.push(Message::user(request));

        let mut records = Vec::new();
        let mut last_text = String::new();
        let mut model = if self.config.model.is_empty() {
            self.provider.default_model().to_string()
        } else {
            self.config.model.clone()
        };

        for iteration in 1..=self.config.max_iterations {
            let mut completion =
                CompletionRequest::new(&self.config.model).with_messages(messages.clone());
            completion.temperature = self.config.temperature;
            completion.max_tokens = self.config.max_tokens;

            let response = self
                .provider
                .complete_with_tools(ToolCompletionRequest::new(completion, self.tools.clone()))
                .await?;
            model = response.model.clone();

            let text = response.content.clone().unwrap_or_default();
            if !text.trim().is_empty() {
                last_text = text.clone();
            }

            if !response.has_tool_calls() {
                debug!(agent = %self.spec.name, iteration, "Agent answered");
                return Ok(AgentRun {
                    response: last_text,
                    tool_calls: records,
                    iterations: iteration,
                    model,
                });
            }

            messages.push(Message::assistant_with_tool_calls(
                text,
                response.tool_calls.clone(),
            ));

            let outputs = self.execute_tool_calls(&response.tool_calls, &mut records).await;
            for (call, output) in response.tool_calls.iter().zip(outputs) {
                messages.push(Message::tool_response(&call.id, &call.name, output.to_string()));
            }
        }

        warn!(
            agent = %self.spec.name,
            max_iterations = self.config.max_iterations,
            "Agent hit iteration limit"
        );
        Ok(AgentRun {
            response: last_text,
            tool_calls: records,
            iterations: self.config.max_iterations,
            model,
        })
    }

    /// Execute one turn's tool calls concurrently; outputs keep call order.
    async fn execute_tool_calls(
        &self,
        calls: &[ToolCall],
        records: &mut Vec<ToolCallRecord>,
    ) -> Vec<serde_json::Value> {
        let inputs: Vec<serde_json::Value> = calls.iter().map(parse_arguments).collect();
        let batch = calls
            .iter()
            .zip(&inputs)
            .map(|(call, input)| (call.name.clone(), input.clone()))
            .collect();

        let start = Instant::now();
        let results = self.runner.execute_parallel(batch).await;

        let mut outputs = Vec::with_capacity(calls.len());
        for ((call, input), result) in calls.iter().zip(inputs).zip(results) {
            let (output, success, duration_ms) = match result {
                Ok(exec) => (exec.result.output, exec.result.success, exec.result.duration_ms),
                Err(e) => {
                    warn!(agent = %self.spec.name, tool = %call.name, error = %e, "Tool call rejected");
                    (
                        serde_json::json!({"status": "error", "result": e.to_string()}),
                        false,
                        start.elapsed().as_millis() as u64,
                    )
                }
            };

            info!(
                agent = %self.spec.name,
                tool = %call.name,
                success,
                duration_ms,
                "Tool completed"
            );

            records.push(ToolCallRecord {
                agent: self.spec.name.clone(),
                tool_name: call.name.clone(),
                input,
                output: output.clone(),
                success,
                duration_ms,
            });
            outputs.push(output);
        }
        outputs
    }
}

/// Parse arguments, falling back to an empty object if malformed
fn parse_arguments(call: &ToolCall) -> serde_json::Value {
    match serde_json::from_str::<serde_json::Value>(&call.arguments) {
        Ok(value) if value.is_object() => value,
        Ok(_) | Err(_) => {
            warn!(
                tool = %call.name,
                arguments = %call.arguments,
                "Malformed tool arguments, using empty object"
            );
            serde_json::json!({})
        }
    }
}
