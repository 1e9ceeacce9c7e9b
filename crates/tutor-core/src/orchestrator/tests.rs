//! Orchestrator tests

use super::config::{OrchestratorConfig, OrchestratorInput};
use super::types::{flatten_records, ExecutionStatus};
use crate::agents::ToolCallRecord;
use std::time::Duration;

fn record(agent: &str, tool: &str, output: serde_json::Value) -> ToolCallRecord {
    ToolCallRecord {
        agent: agent.to_string(),
        tool_name: tool.to_string(),
        input: serde_json::json!({}),
        output,
        success: true,
        duration_ms: 1,
    }
}

#[test]
fn test_orchestrator_input() {
    let input = OrchestratorInput::new("web_user", "Hello");
    assert_eq!(input.session_key(), "tutor:web_user");
    assert!(input.persist);

    let anonymous = OrchestratorInput::anonymous("Hello");
    assert_eq!(anonymous.user_id, "web_user");
    assert!(!anonymous.persist);
}

#[test]
fn test_orchestrator_config_defaults() {
    let config = OrchestratorConfig::default();
    assert_eq!(config.max_iterations, 10);
    assert_eq!(config.max_execution_secs, 120);
    assert_eq!(config.max_session_messages, 40);
    assert_eq!(config.delegation_timeout(), Duration::from_secs(120));

    let unlimited = config.with_max_execution_secs(0);
    assert_eq!(unlimited.delegation_timeout(), Duration::from_secs(300));
}

#[test]
fn test_execution_status() {
    assert_eq!(
        serde_json::to_string(&ExecutionStatus::Completed).unwrap(),
        "\"completed\""
    );
    assert_eq!(
        serde_json::to_string(&ExecutionStatus::Failed).unwrap(),
        "\"failed\""
    );
}

#[test]
fn test_flatten_records_inlines_specialist_calls() {
    let inner = record("physics_agent", "lookup_physics_constant", serde_json::json!({"status": "success"}));
    let outer = record(
        "multiagent",
        "physics_agent",
        serde_json::json!({"agent": "physics_agent", "response": "c", "tool_calls": [inner]}),
    );
    let plain = record("multiagent", "maths_agent", serde_json::json!({"response": "x"}));

    let flat = flatten_records(vec![outer, plain]);
    let names: Vec<&str> = flat.iter().map(|r| r.tool_name.as_str()).collect();
    assert_eq!(names, vec!["physics_agent", "lookup_physics_constant", "maths_agent"]);
    assert_eq!(flat[1].agent, "physics_agent");
}
