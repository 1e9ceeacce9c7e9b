//! Query endpoint
//!
//! POST /api/query - Answer a question through the agent tree
//!
//! Always answers 200 with `{response}`; failures are reported as fixed
//! user-facing sentences and the details go to the log.

use axum::extract::Extension;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use tutor_core::{ExecutionStatus, OrchestratorInput};

use super::ApiState;

pub const NOT_CONFIGURED_MESSAGE: &str = "🔧 Service not configured. Please set up Google AI API key or Vertex AI credentials in your .env file. Check the server console for setup instructions.";

pub const EMPTY_QUERY_MESSAGE: &str = "Please provide a valid question.";

pub const NO_ANSWER_MESSAGE: &str = "I apologize, but I couldn't process your question right now. Please try rephrasing your question or try again later.";

pub const ERROR_MESSAGE: &str = "I encountered an error while processing your question. Please try again later or contact support if the issue persists.";

/// Query request body
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub text: String,
    /// Conversation owner; without one the question is answered with no history
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Query response body
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub response: String,
}

impl QueryResponse {
    fn reply(response: impl Into<String>) -> Json<Self> {
        Json(Self {
            response: response.into(),
        })
    }
}

async fn process_query(
    Extension(state): Extension<ApiState>,
    Json(request): Json<QueryRequest>,
) -> Json<QueryResponse> {
    let Some(orchestrator) = state.orchestrator.as_ref() else {
        return QueryResponse::reply(NOT_CONFIGURED_MESSAGE);
    };

    let text = request.text.trim();
    if text.is_empty() {
        return QueryResponse::reply(EMPTY_QUERY_MESSAGE);
    }

    let input = match request
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(user_id) => OrchestratorInput::new(user_id, text),
        None => OrchestratorInput::anonymous(text),
    };

    info!(
        user_id = %input.user_id,
        persist = input.persist,
        chars = text.chars().count(),
        "Processing query"
    );

    match orchestrator.process(input).await {
        Ok(result) if result.status == ExecutionStatus::Completed => {
            info!(
                execution_id = %result.execution_id,
                duration_ms = result.duration_ms,
                "Query processed"
            );
            QueryResponse::reply(result.response)
        }
        Ok(result) => {
            info!(execution_id = %result.execution_id, "Query produced no answer");
            QueryResponse::reply(NO_ANSWER_MESSAGE)
        }
        Err(e) => {
            error!(error = %e, "Query failed");
            QueryResponse::reply(ERROR_MESSAGE)
        }
    }
}

/// Create query routes
pub fn query_routes() -> Router {
    Router::new().route("/api/query", post(process_query))
}
