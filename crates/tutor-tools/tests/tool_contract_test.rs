//! Wire-contract tests for the deterministic tools, driven through the
//! registry and runner the way an agent calls them.

use std::sync::Arc;

use serde_json::json;
use tutor_tools::{register_builtins, ToolRegistry, ToolRunner};

fn runner() -> ToolRunner {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);
    ToolRunner::with_defaults(Arc::new(registry))
}

async fn call(tool: &str, input: serde_json::Value) -> serde_json::Value {
    runner()
        .execute(tool, input)
        .await
        .expect("tool should be registered")
        .result
        .output
}

// ============================================================================
// Calculator
// ============================================================================

#[tokio::test]
async fn test_calculator_success_shape() {
    let output = call("calculator", json!({"operation": "divide", "a": 11, "b": 299792.458})).await;
    assert_eq!(output["status"], "success");
    let ratio = output["result"].as_f64().unwrap();
    assert!((ratio * 100.0 - 0.003_669_2).abs() < 1e-6);
}

#[tokio::test]
async fn test_calculator_error_shape() {
    let output = call("calculator", json!({"operation": "power", "a": 2, "b": 8})).await;
    assert_eq!(
        output,
        json!({
            "status": "error",
            "result": "Invalid operation 'power'. Supported operations: add, subtract, multiply, divide"
        })
    );
}

// ============================================================================
// Element lookup
// ============================================================================

#[tokio::test]
async fn test_elements_success_shape() {
    let output = call("elements_lookup", json!({"element_name": "  HELIUM "})).await;
    assert_eq!(output["status"], "success");
    assert_eq!(output["element"], "Helium");
    assert_eq!(output["symbol"], "He");
    assert_eq!(output["group"], 18);
    assert_eq!(output["period"], 1);
    assert_eq!(
        output["description"],
        "Helium (He) is a noble gas in group 18, period 1. Atomic mass: 4.0026 u"
    );
}

#[tokio::test]
async fn test_elements_error_shape() {
    let output = call("elements_lookup", json!({"element_name": "unobtainium"})).await;
    assert_eq!(output["status"], "error");
    assert_eq!(
        output["result"],
        "Element 'unobtainium' not found in the database."
    );

    let names: Vec<&str> = output["available_elements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert!(names.contains(&"carbon"));
    assert!(output["suggestion"].is_string());
}

// ============================================================================
// Physics constants
// ============================================================================

#[tokio::test]
async fn test_constant_success_shape() {
    let output = call(
        "lookup_physics_constant",
        json!({"constant_name": "SPEED_OF_LIGHT"}),
    )
    .await;
    assert_eq!(output["status"], "success");
    assert_eq!(output["constant_name"], "SPEED_OF_LIGHT");
    assert_eq!(output["value"].as_f64(), Some(299_792_458.0));
    assert!(output["info"].as_str().unwrap().contains("299,792,458 m/s"));
}

#[tokio::test]
async fn test_constant_error_shape() {
    let output = call(
        "lookup_physics_constant",
        json!({"constant_name": "speed of light"}),
    )
    .await;
    assert_eq!(output["status"], "error");
    assert_eq!(output["result"], "Constant 'speed of light' not found.");
    assert!(!output["available_constants"].as_array().unwrap().is_empty());
    assert_eq!(
        output["suggestion"],
        "Try using underscores in names, e.g., 'speed_of_light' or 'planck_constant'"
    );
}

// ============================================================================
// Idempotence
// ============================================================================

#[tokio::test]
async fn test_repeated_calls_are_byte_identical() {
    let cases = [
        ("calculator", json!({"operation": "multiply", "a": 3, "b": 7})),
        ("elements_lookup", json!({"element_name": "copper"})),
        ("elements_lookup", json!({"element_name": "vibranium"})),
        ("lookup_physics_constant", json!({"constant_name": "planck_constant"})),
    ];

    for (tool, input) in cases {
        let first = call(tool, input.clone()).await.to_string();
        let second = call(tool, input).await.to_string();
        assert_eq!(first, second, "{tool}");
    }
}
