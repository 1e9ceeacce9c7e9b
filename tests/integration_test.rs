//! Integration tests for the tutor
//!
//! These tests verify the integration between the workspace crates:
//! - tutor-tools: registry, runner and the deterministic tools
//! - tutor-llm: provider configuration and the mock provider
//! - tutor-core: agents, orchestrator and session memory

use std::sync::Arc;
use std::time::Duration;

use tutor_core::{
    ExecutionStatus, Orchestrator, OrchestratorConfig, OrchestratorInput, SessionStore,
    SPECIALIST_NAMES,
};
use tutor_llm::{GeminiConfig, MockProvider, ToolCall, ToolCompletionResponse};
use tutor_tools::{register_builtins, RunnerConfig, ToolRegistry, ToolRunner};

fn registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);
    registry
}

// ============================================================================
// Tool Integration Tests
// ============================================================================

#[test]
fn test_builtin_tools_registered() {
    let registry = registry();
    for name in [
        "calculator",
        "elements_lookup",
        "lookup_physics_constant",
        "web_search",
    ] {
        assert!(registry.has(name), "{name} should be registered");
    }
}

#[tokio::test]
async fn test_runner_with_custom_timeout() {
    let config = RunnerConfig::new(Duration::from_secs(5)).with_max_timeout(Duration::from_secs(10));
    let runner = ToolRunner::new(Arc::new(registry()), config);

    let exec = runner
        .execute(
            "calculator",
            serde_json::json!({"operation": "subtract", "a": 10, "b": 4.5}),
        )
        .await
        .unwrap();
    assert!(exec.result.success);
    assert_eq!(exec.result.output["result"].as_f64(), Some(5.5));
}

// ============================================================================
// LLM Configuration Tests
// ============================================================================

#[tokio::test]
async fn test_gemini_not_configured_without_credentials() {
    let result = GeminiConfig::from_lookup(|_| None).await;
    assert!(matches!(result, Err(tutor_llm::Error::NotConfigured(_))));
}

// ============================================================================
// Orchestration Tests
// ============================================================================

#[tokio::test]
async fn test_chemistry_question_end_to_end() {
    let mock = MockProvider::new();
    mock.add_tool_response(ToolCompletionResponse::calls(
        vec![ToolCall::new(
            "r1",
            "chemistry_agent",
            r#"{"request": "Tell me about copper"}"#,
        )],
        "mock-model",
    ));
    mock.add_tool_response(ToolCompletionResponse::calls(
        vec![ToolCall::new(
            "c1",
            "elements_lookup",
            r#"{"element_name": "copper"}"#,
        )],
        "mock-model",
    ));
    mock.add_tool_response(ToolCompletionResponse::text(
        "Copper (Cu) is a transition metal.",
        "mock-model",
    ));
    mock.add_tool_response(ToolCompletionResponse::text(
        "Copper, symbol Cu, is a transition metal in group 11.",
        "mock-model",
    ));

    let orchestrator = Orchestrator::new(
        Arc::new(mock),
        &registry(),
        OrchestratorConfig::default(),
    );
    let result = orchestrator
        .process(OrchestratorInput::new("web_user", "Tell me about copper"))
        .await
        .unwrap();

    assert_eq!(result.status, ExecutionStatus::Completed);
    assert!(result.response.contains("Cu"));
    assert_eq!(result.tool_calls.len(), 2);

    let lookup = &result.tool_calls[1];
    assert_eq!(lookup.agent, "chemistry_agent");
    assert_eq!(lookup.output["symbol"], "Cu");
    assert_eq!(lookup.output["group"], 11);

    assert_eq!(orchestrator.memory().count().await.unwrap(), 1);
}

#[test]
fn test_specialist_roster_matches_orchestrator() {
    let orchestrator = Orchestrator::new(
        Arc::new(MockProvider::new()),
        &registry(),
        OrchestratorConfig::default(),
    );
    assert_eq!(orchestrator.specialist_names(), SPECIALIST_NAMES.to_vec());
}
