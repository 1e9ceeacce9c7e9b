//! Runner - Tool execution engine
//!
//! Looks tools up in a registry and runs them under a timeout. A tool that
//! returns `Err` is converted into a failed `ToolResult` so the calling
//! agent can still read what went wrong.

use crate::error::{Error, Result};
use crate::registry::{ToolRegistry, ToolResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

/// Configuration for the tool runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Default timeout for tool execution
    pub default_timeout: Duration,
    /// Maximum timeout allowed
    pub max_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(30),
            max_timeout: Duration::from_secs(300),
        }
    }
}

impl RunnerConfig {
    /// Create a new configuration with default timeout
    #[must_use]
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            default_timeout,
            ..Default::default()
        }
    }

    /// Set the maximum timeout
    #[must_use]
    pub fn with_max_timeout(mut self, max_timeout: Duration) -> Self {
        self.max_timeout = max_timeout;
        self
    }

    /// Timeout actually applied to a call
    #[must_use]
    pub fn effective_timeout(&self) -> Duration {
        self.default_timeout.min(self.max_timeout)
    }
}

/// Tool execution result with additional metadata
#[derive(Debug)]
pub struct ExecutionResult {
    /// The tool result
    pub result: ToolResult,
    /// Tool name
    pub tool_name: String,
}

/// Tool runner bound to one registry
#[derive(Clone)]
pub struct ToolRunner {
    registry: Arc<ToolRegistry>,
    config: RunnerConfig,
}

impl ToolRunner {
    /// Create a new tool runner
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, config: RunnerConfig) -> Self {
        Self { registry, config }
    }

    /// Create with default configuration
    #[must_use]
    pub fn with_defaults(registry: Arc<ToolRegistry>) -> Self {
        Self::new(registry, RunnerConfig::default())
    }

    /// Get the registry
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Execute a tool by name
    #[instrument(skip(self, input), fields(tool = %tool_name))]
    pub async fn execute(
        &self,
        tool_name: &str,
        input: serde_json::Value,
    ) -> Result<ExecutionResult> {
        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| Error::NotFound(tool_name.to_string()))?;

        let execution_timeout = self.config.effective_timeout();
        let start = Instant::now();
        debug!(timeout_ms = %execution_timeout.as_millis(), "Executing tool");

        let result = match tool.validate_input(&input) {
            Err(e) => ToolResult::failure(e.to_string(), 0),
            Ok(()) => match timeout(execution_timeout, tool.execute(input)).await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    let duration = start.elapsed().as_millis() as u64;
                    warn!(error = %e, "Tool execution failed");
                    ToolResult::failure(e.to_string(), duration)
                }
                Err(_) => {
                    let duration = start.elapsed().as_millis() as u64;
                    warn!(timeout_ms = %execution_timeout.as_millis(), "Tool execution timed out");
                    return Err(Error::Timeout(duration));
                }
            },
        };

        debug!(
            success = %result.success,
            duration_ms = %result.duration_ms,
            "Tool execution completed"
        );

        Ok(ExecutionResult {
            result,
            tool_name: tool_name.to_string(),
        })
    }

    /// Execute multiple tools concurrently. Results keep the input order.
    #[instrument(skip(self, calls), fields(count = calls.len()))]
    pub async fn execute_parallel(
        &self,
        calls: Vec<(String, serde_json::Value)>,
    ) -> Vec<Result<ExecutionResult>> {
        let futures: Vec<_> = calls
            .into_iter()
            .map(|(tool_name, input)| {
                let runner = self.clone();
                async move { runner.execute(&tool_name, input).await }
            })
            .collect();

        futures::future::join_all(futures).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;

    fn runner() -> ToolRunner {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry);
        ToolRunner::with_defaults(Arc::new(registry))
    }

    #[test]
    fn test_runner_config() {
        let config =
            RunnerConfig::new(Duration::from_secs(600)).with_max_timeout(Duration::from_secs(120));

        assert_eq!(config.default_timeout, Duration::from_secs(600));
        assert_eq!(config.effective_timeout(), Duration::from_secs(120));

        assert_eq!(runner().config().effective_timeout(), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_found() {
        let err = runner()
            .execute("flux_capacitor", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(name) if name == "flux_capacitor"));
    }

    #[tokio::test]
    async fn test_non_object_input_becomes_failure() {
        let exec = runner()
            .execute("calculator", serde_json::json!([1, 2]))
            .await
            .unwrap();
        assert!(!exec.result.success);
        assert_eq!(exec.result.output["status"], "error");
    }

    #[tokio::test]
    async fn test_parallel_keeps_order() {
        let results = runner()
            .execute_parallel(vec![
                (
                    "calculator".to_string(),
                    serde_json::json!({"operation": "add", "a": 1, "b": 2}),
                ),
                (
                    "elements_lookup".to_string(),
                    serde_json::json!({"element_name": "gold"}),
                ),
                (
                    "lookup_physics_constant".to_string(),
                    serde_json::json!({"constant_name": "gas_constant"}),
                ),
            ])
            .await;

        assert_eq!(results.len(), 3);
        let names: Vec<String> = results
            .iter()
            .map(|r| r.as_ref().unwrap().tool_name.clone())
            .collect();
        assert_eq!(
            names,
            vec!["calculator", "elements_lookup", "lookup_physics_constant"]
        );
        assert_eq!(results[0].as_ref().unwrap().result.output["result"], 3.0);
        assert_eq!(results[1].as_ref().unwrap().result.output["symbol"], "Au");
    }
}
