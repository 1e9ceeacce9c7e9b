//! Mock LLM Provider for testing
//!
//! Returns scripted responses in order and records every request it sees,
//! so tests can drive an agent loop without a network.

use crate::completion::{
    CompletionRequest, CompletionResponse, ToolCompletionRequest, ToolCompletionResponse,
};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::provider::LlmProvider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const MOCK_MODEL: &str = "mock-model";

/// What the mock saw on one call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Conversation sent to the model
    pub messages: Vec<Message>,
    /// Names of the tools offered
    pub tool_names: Vec<String>,
}

/// A mock LLM provider that returns queued responses or default ones.
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<Result<ToolCompletionResponse>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response to the queue.
    pub fn add_tool_response(&self, response: ToolCompletionResponse) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(response));
    }

    /// Queue an error for the next call.
    pub fn add_error(&self, error: Error) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Number of completion calls made so far
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// All requests seen so far
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The most recent request, if any
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    fn record(&self, messages: &[Message], tool_names: Vec<String>) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                messages: messages.to_vec(),
                tool_names,
            });
    }

    fn next_response(&self) -> Result<ToolCompletionResponse> {
        let mut responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        responses
            .pop_front()
            .unwrap_or_else(|| Ok(ToolCompletionResponse::text("mock response", MOCK_MODEL)))
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn supports_tools(&self) -> bool {
        true
    }

    fn available_models(&self) -> Vec<String> {
        vec![MOCK_MODEL.to_string()]
    }

    fn default_model(&self) -> &str {
        MOCK_MODEL
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.record(&request.messages, Vec::new());
        let response = self.next_response()?;
        Ok(CompletionResponse {
            content: response.content.unwrap_or_default(),
            usage: response.usage,
            finish_reason: response.finish_reason,
            model: response.model,
        })
    }

    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse> {
        self.record(&request.request.messages, request.tool_names());
        self.next_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolCall, ToolDefinition};

    #[tokio::test]
    async fn test_queued_responses_in_order() {
        let mock = MockProvider::new();
        mock.add_tool_response(ToolCompletionResponse::calls(
            vec![ToolCall::new("c1", "calculator", "{}")],
            MOCK_MODEL,
        ));
        mock.add_tool_response(ToolCompletionResponse::text("done", MOCK_MODEL));

        let request = ToolCompletionRequest::new(
            CompletionRequest::new("").with_message(Message::user("hi")),
            vec![ToolDefinition::new("calculator", "", serde_json::json!({}))],
        );

        let first = mock.complete_with_tools(request.clone()).await.unwrap();
        assert!(first.has_tool_calls());
        let second = mock.complete_with_tools(request.clone()).await.unwrap();
        assert_eq!(second.content.as_deref(), Some("done"));
        let third = mock.complete_with_tools(request).await.unwrap();
        assert_eq!(third.content.as_deref(), Some("mock response"));

        assert_eq!(mock.request_count(), 3);
        let last = mock.last_request().unwrap();
        assert_eq!(last.tool_names, vec!["calculator".to_string()]);
        assert_eq!(last.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_queued_error() {
        let mock = MockProvider::new();
        mock.add_error(Error::RateLimit);
        let result = mock.complete(CompletionRequest::new("")).await;
        assert!(matches!(result, Err(Error::RateLimit)));
    }
}
