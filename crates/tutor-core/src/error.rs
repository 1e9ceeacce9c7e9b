//! Error types for tutor-core
//!
//! This module provides error types and user-friendly error formatting.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// LLM provider error
    #[error("llm error: {0}")]
    Llm(#[from] tutor_llm::Error),

    /// Tool execution error
    #[error("tool error: {0}")]
    Tool(#[from] tutor_tools::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Execution failed
    #[error("execution error: {0}")]
    Execution(String),

    /// Whole-request deadline exceeded
    #[error("execution timed out after {0}s")]
    Timeout(u64),

    /// Internal error (serialization, storage)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Human-readable error messages
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get a suggestion for how to fix the error
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::Llm(tutor_llm::Error::NotConfigured(_)) => {
                "🔑 The language model is not configured.".to_string()
            }
            Error::Llm(tutor_llm::Error::RateLimit) => {
                "⏳ The tutor is busy right now. Please try again later.".to_string()
            }
            Error::Llm(tutor_llm::Error::Network(_)) | Error::Llm(tutor_llm::Error::Timeout(_)) => {
                "🌐 Could not reach the language model.".to_string()
            }
            Error::Llm(_) => "🤖 The language model returned an error.".to_string(),
            Error::Tool(e) => format!("🔧 Tool error: {e}"),
            Error::Configuration(msg) => format!("⚙️ Configuration error: {msg}"),
            Error::Execution(_) => "⚡ The question could not be answered.".to_string(),
            Error::Timeout(secs) => format!("⏱️ No answer within {secs} seconds."),
            Error::Internal(_) => "❌ Internal error.".to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::Llm(tutor_llm::Error::NotConfigured(_)) => Some(
                "💡 Set GOOGLE_AI_API_KEY, or GOOGLE_CLOUD_PROJECT for Vertex AI, in your .env file."
                    .to_string(),
            ),
            Error::Llm(tutor_llm::Error::RateLimit) => {
                Some("💡 Wait a moment before asking again.".to_string())
            }
            Error::Timeout(_) => {
                Some("💡 Try splitting the question into smaller parts.".to_string())
            }
            Error::Configuration(_) => {
                Some("💡 Check config/default.toml and your TUTOR_ environment variables.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error for display in a chat reply
pub fn format_error_for_chat(error: &Error) -> String {
    let mut output = error.user_message();

    if let Some(suggestion) = error.suggestion() {
        output.push_str("\n\n");
        output.push_str(&suggestion);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_has_suggestion() {
        let err = Error::Llm(tutor_llm::Error::NotConfigured("no key".to_string()));
        let text = format_error_for_chat(&err);
        assert!(text.contains("not configured"));
        assert!(text.contains("GOOGLE_AI_API_KEY"));
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = Error::Llm(tutor_llm::Error::Api("INVALID_ARGUMENT: secret detail".to_string()));
        assert!(!err.user_message().contains("secret"));
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_tool_error_conversion() {
        let err: Error = tutor_tools::Error::NotFound("abacus".to_string()).into();
        assert!(matches!(err, Error::Tool(_)));
        assert!(err.to_string().contains("abacus"));
    }
}
