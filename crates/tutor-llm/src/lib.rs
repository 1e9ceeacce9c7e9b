//! Tutor LLM - LLM Provider Abstraction
//!
//! This crate provides LLM integration for the tutor:
//! - Provider: the trait every model backend implements
//! - Gemini: Google Gemini via an AI Studio API key or Vertex AI credentials
//! - Mock: a scripted provider for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod gemini;
pub mod message;
pub mod mock;
pub mod provider;
pub mod tools;
pub mod util;

pub use completion::{
    CompletionRequest, CompletionResponse, TokenUsage, ToolCompletionRequest,
    ToolCompletionResponse,
};
pub use error::{Error, Result};
pub use gemini::{GeminiAuth, GeminiConfig, GeminiProvider};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use provider::LlmProvider;
pub use tools::{ToolCall, ToolChoice, ToolDefinition};
