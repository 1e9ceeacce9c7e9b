//! Message and tool conversion for the Gemini API

use super::schema::strip_unsupported_schema_fields;
use super::types::*;
use crate::message::{Message, MessageRole};
use crate::tools::{ToolChoice, ToolDefinition};

/// Convert messages to Gemini format, returning the system instruction separately
pub(crate) fn convert_messages(messages: &[Message]) -> (Option<GeminiContent>, Vec<GeminiContent>) {
    let mut system_instruction = None;
    let mut contents: Vec<GeminiContent> = Vec::new();

    for msg in messages {
        match msg.role {
            MessageRole::System => {
                system_instruction = Some(GeminiContent {
                    role: None,
                    parts: vec![GeminiPart::Text {
                        text: msg.content.clone(),
                    }],
                });
            }
            MessageRole::User => {
                if !msg.content.is_empty() {
                    contents.push(GeminiContent::new(
                        "user",
                        vec![GeminiPart::Text {
                            text: msg.content.clone(),
                        }],
                    ));
                }
            }
            MessageRole::Assistant => {
                let mut parts = Vec::new();
                if !msg.content.is_empty() {
                    parts.push(GeminiPart::Text {
                        text: msg.content.clone(),
                    });
                }
                for tc in &msg.tool_calls {
                    let args = serde_json::from_str(&tc.arguments)
                        .unwrap_or_else(|_| serde_json::json!({}));
                    parts.push(GeminiPart::FunctionCall {
                        function_call: FunctionCall {
                            name: tc.name.clone(),
                            args,
                        },
                        thought_signature: tc.thought_signature.clone(),
                    });
                }
                if !parts.is_empty() {
                    contents.push(GeminiContent::new("model", parts));
                }
            }
            MessageRole::Tool => {
                let Some(tool_name) = &msg.name else {
                    continue;
                };
                let response = match serde_json::from_str::<serde_json::Value>(&msg.content) {
                    Ok(value) if value.is_object() => value,
                    Ok(value) => serde_json::json!({ "result": value }),
                    Err(_) => serde_json::json!({ "result": msg.content }),
                };
                let part = GeminiPart::FunctionResponse {
                    function_response: FunctionResponse {
                        name: tool_name.clone(),
                        response,
                    },
                };

                // All responses to one model turn must share a single user turn.
                match contents.last_mut() {
                    Some(last) if is_function_response_turn(last) => last.parts.push(part),
                    _ => contents.push(GeminiContent::new("user", vec![part])),
                }
            }
        }
    }

    (system_instruction, contents)
}

fn is_function_response_turn(content: &GeminiContent) -> bool {
    content.role.as_deref() == Some("user")
        && !content.parts.is_empty()
        && content
            .parts
            .iter()
            .all(|p| matches!(p, GeminiPart::FunctionResponse { .. }))
}

/// Convert tool definitions to Gemini format
pub(crate) fn convert_tools(tools: &[ToolDefinition]) -> Vec<GeminiTool> {
    let declarations = tools
        .iter()
        .map(|tool| {
            let mut params = tool.parameters.clone();
            strip_unsupported_schema_fields(&mut params);
            FunctionDeclaration {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: params,
            }
        })
        .collect();

    vec![GeminiTool {
        function_declarations: declarations,
    }]
}

/// Convert tool choice to Gemini format
pub(crate) fn convert_tool_choice(choice: &ToolChoice) -> ToolConfig {
    let (mode, allowed) = match choice {
        ToolChoice::Auto => ("AUTO", None),
        ToolChoice::None => ("NONE", None),
        ToolChoice::Required => ("ANY", None),
        ToolChoice::Tool(name) => ("ANY", Some(vec![name.clone()])),
    };
    ToolConfig {
        function_calling_config: FunctionCallingConfig {
            mode: mode.to_string(),
            allowed_function_names: allowed,
        },
    }
}
