//! Tests for Gemini provider

use super::config::{GeminiAuth, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_LOCATION, DEFAULT_MODEL};
use super::convert::{convert_messages, convert_tool_choice, convert_tools};
use super::provider::{extract_candidate, parse_response, GeminiProvider};
use super::schema::strip_unsupported_schema_fields;
use super::security::sanitize_api_error;
use super::types::GeminiPart;
use crate::error::Error;
use crate::completion::CompletionRequest;
use crate::message::Message;
use crate::provider::LlmProvider;
use crate::tools::{ToolCall, ToolChoice, ToolDefinition};
use std::collections::HashMap;
use std::time::Duration;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_config_builder() {
    let config = GeminiConfig::new("test-key")
        .with_model("gemini-2.5-flash")
        .with_max_tokens(4096)
        .with_timeout(Duration::from_secs(30));

    assert_eq!(config.auth, GeminiAuth::ApiKey("test-key".to_string()));
    assert_eq!(config.default_model, "gemini-2.5-flash");
    assert_eq!(config.default_max_tokens, 4096);
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_config_defaults() {
    let config = GeminiConfig::new("test-key");
    assert_eq!(config.default_model, DEFAULT_MODEL);
    assert_eq!(config.default_model, "gemini-2.0-flash-001");
    assert_eq!(config.default_max_tokens, 8192);
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_endpoints() {
    let studio = GeminiConfig::new("AIzaSecretKey123456");
    let url = studio.endpoint("gemini-2.0-flash-001");
    assert_eq!(
        url,
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-001:generateContent"
    );
    assert!(!url.contains("AIza"));

    let vertex = GeminiConfig::vertex("my-project", "europe-west4", "ya29.token");
    assert_eq!(
        vertex.endpoint("gemini-2.0-flash-001"),
        "https://europe-west4-aiplatform.googleapis.com/v1/projects/my-project\
         /locations/europe-west4/publishers/google/models/gemini-2.0-flash-001:generateContent"
    );
}

#[tokio::test]
async fn test_from_lookup_api_key_precedence() {
    let config = GeminiConfig::from_lookup(lookup_from(&[
        ("GOOGLE_API_KEY", "third-key-000000"),
        ("GEMINI_API_KEY", "second-key-00000"),
        ("GOOGLE_AI_API_KEY", "first-key-000000"),
        ("GOOGLE_CLOUD_PROJECT", "ignored"),
    ]))
    .await
    .unwrap();
    assert_eq!(config.auth, GeminiAuth::ApiKey("first-key-000000".to_string()));

    let config = GeminiConfig::from_lookup(lookup_from(&[
        ("GOOGLE_API_KEY", "third-key-000000"),
        ("GEMINI_API_KEY", "second-key-00000"),
    ]))
    .await
    .unwrap();
    assert_eq!(config.auth, GeminiAuth::ApiKey("second-key-00000".to_string()));
}

#[tokio::test]
async fn test_from_lookup_vertex() {
    let config = GeminiConfig::from_lookup(lookup_from(&[
        ("GOOGLE_CLOUD_PROJECT", "tutor-prod"),
        ("GOOGLE_CLOUD_ACCESS_TOKEN", "ya29.abcdefghijkl"),
    ]))
    .await
    .unwrap();

    match config.auth {
        GeminiAuth::VertexAi {
            project, location, ..
        } => {
            assert_eq!(project, "tutor-prod");
            assert_eq!(location, DEFAULT_LOCATION);
        }
        GeminiAuth::ApiKey(_) => panic!("Expected Vertex AI auth"),
    }
}

#[tokio::test]
async fn test_from_lookup_not_configured() {
    let result = GeminiConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).await;
    assert!(matches!(result, Err(Error::NotConfigured(_))));
}

#[test]
fn test_message_conversion() {
    let messages = vec![
        Message::system("You are a tutor"),
        Message::user("Hello"),
        Message::assistant("Hi there!"),
    ];

    let (system, converted) = convert_messages(&messages);

    assert!(system.is_some());
    assert_eq!(converted.len(), 2);
    assert_eq!(converted[0].role.as_deref(), Some("user"));
    assert_eq!(converted[1].role.as_deref(), Some("model"));
}

#[test]
fn test_tool_responses_merge_into_one_turn() {
    let calls = vec![
        ToolCall::new("a", "physics_agent", r#"{"request":"speed of light"}"#),
        ToolCall::new("b", "chemistry_agent", r#"{"request":"carbon"}"#),
    ];
    let messages = vec![
        Message::user("Two questions"),
        Message::assistant_with_tool_calls("", calls),
        Message::tool_response("a", "physics_agent", r#"{"response":"c"}"#),
        Message::tool_response("b", "chemistry_agent", "plain text"),
    ];

    let (_, converted) = convert_messages(&messages);
    assert_eq!(converted.len(), 3);

    let model_turn = &converted[1];
    assert_eq!(model_turn.role.as_deref(), Some("model"));
    assert_eq!(model_turn.parts.len(), 2);
    assert!(matches!(model_turn.parts[0], GeminiPart::FunctionCall { .. }));

    let responses = &converted[2];
    assert_eq!(responses.role.as_deref(), Some("user"));
    assert_eq!(responses.parts.len(), 2);
    match &responses.parts[1] {
        GeminiPart::FunctionResponse { function_response } => {
            assert_eq!(function_response.name, "chemistry_agent");
            assert_eq!(function_response.response["result"], "plain text");
        }
        other => panic!("Expected function response, got {other:?}"),
    }
}

#[test]
fn test_tool_choice_mapping() {
    let auto = convert_tool_choice(&ToolChoice::Auto);
    assert_eq!(auto.function_calling_config.mode, "AUTO");

    let forced = convert_tool_choice(&ToolChoice::Tool("calculator".to_string()));
    assert_eq!(forced.function_calling_config.mode, "ANY");
    assert_eq!(
        forced.function_calling_config.allowed_function_names,
        Some(vec!["calculator".to_string()])
    );
}

#[test]
fn test_parse_function_call_response() {
    let body = r#"{
        "candidates": [{
            "content": {"role": "model", "parts": [
                {"functionCall": {"name": "calculator", "args": {"operation": "add", "a": 2, "b": 3}}}
            ]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 10, "totalTokenCount": 12}
    }"#;

    let response = parse_response(body).unwrap();
    let (content, calls, finish) = extract_candidate(&response).unwrap();
    assert!(content.is_none());
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "calculator");
    assert!(!calls[0].id.is_empty());
    let args: serde_json::Value = calls[0].parse_arguments().unwrap();
    assert_eq!(args["b"], 3);
    assert_eq!(finish.as_deref(), Some("STOP"));
}

#[test]
fn test_parse_text_response_joins_parts() {
    let body = r#"{"candidates": [{"content": {"parts": [{"text": "4"}, {"text": " apples"}]}}]}"#;
    let response = parse_response(body).unwrap();
    let (content, calls, _) = extract_candidate(&response).unwrap();
    assert_eq!(content.as_deref(), Some("4 apples"));
    assert!(calls.is_empty());
}

#[test]
fn test_no_candidates_is_invalid() {
    let response = parse_response(r#"{"candidates": []}"#).unwrap();
    assert!(matches!(
        extract_candidate(&response),
        Err(Error::InvalidResponse(_))
    ));
    assert!(matches!(
        parse_response("<html>"),
        Err(Error::InvalidResponse(_))
    ));
}

// Security tests

#[test]
fn test_sanitize_api_error() {
    assert!(sanitize_api_error("Invalid API key provided").contains("authentication"));
    assert!(sanitize_api_error("RESOURCE_EXHAUSTED: quota").contains("rate limit"));
    assert!(sanitize_api_error("INTERNAL: boom").contains("server error"));
    assert_eq!(sanitize_api_error("INVALID_ARGUMENT: bad"), "INVALID_ARGUMENT: bad");
    assert!(sanitize_api_error(&"x".repeat(400)).ends_with("...(truncated)"));
}

#[test]
fn test_config_debug_masks_credentials() {
    let config = GeminiConfig::new("AIzaSuperSecretKey123456789");
    let debug = format!("{config:?}");
    assert!(!debug.contains("SuperSecret"));
    assert!(debug.contains("AIza...6789"));

    let vertex = GeminiConfig::vertex("proj", "us-central1", "ya29.very-secret-token-value");
    let debug = format!("{vertex:?}");
    assert!(!debug.contains("very-secret"));
    assert!(debug.contains("proj"));
}

#[test]
fn test_strip_unsupported_schema_fields() {
    let mut schema = serde_json::json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "max_results": {"type": "integer", "default": 5},
            "query": {"type": "string"}
        }
    });
    strip_unsupported_schema_fields(&mut schema);
    assert!(schema.get("additionalProperties").is_none());
    assert!(schema["properties"]["max_results"].get("default").is_none());
    assert_eq!(schema["properties"]["query"]["type"], "string");
}

#[test]
fn test_convert_tools_strips_unsupported_fields() {
    let tools = vec![ToolDefinition::new(
        "web_search",
        "Search",
        serde_json::json!({"type": "object", "additionalProperties": false}),
    )];
    let converted = convert_tools(&tools);
    assert_eq!(converted.len(), 1);
    let decl = &converted[0].function_declarations[0];
    assert_eq!(decl.name, "web_search");
    assert!(decl.parameters.get("additionalProperties").is_none());
}

#[tokio::test]
async fn test_network_error_does_not_expose_api_key() {
    let config = GeminiConfig::new("AIzaSECRETKEY123")
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(5));
    let provider = GeminiProvider::new(config).unwrap();

    let request = CompletionRequest::new(DEFAULT_MODEL).with_message(Message::user("hi"));
    let err = provider.complete(request).await.unwrap_err();

    assert!(matches!(err, Error::Network(_) | Error::Timeout(_)));
    assert!(!err.to_string().contains("AIzaSECRETKEY123"));
    assert!(!format!("{err:?}").contains("AIzaSECRETKEY123"));
}
