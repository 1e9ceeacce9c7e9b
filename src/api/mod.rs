//! Web API module for the tutor
//!
//! Provides REST API endpoints for:
//! - Question answering through the agent tree
//! - Health and credential status
//! - Tool listing

pub mod health;
pub mod query;
pub mod tools;

use axum::{Extension, Router};
use std::sync::Arc;
use tutor_core::Orchestrator;
use tutor_tools::ToolRegistry;

pub use health::health_routes;
pub use query::query_routes;
pub use tools::tools_routes;

/// Shared handler state
#[derive(Clone)]
pub struct ApiState {
    /// `None` when no LLM credentials were found at startup
    pub orchestrator: Option<Arc<Orchestrator>>,
    pub tools: Arc<ToolRegistry>,
}

impl ApiState {
    pub fn is_configured(&self) -> bool {
        self.orchestrator.is_some()
    }
}

/// Create the API router with all endpoints
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(query_routes())
        .merge(tools_routes())
        .layer(Extension(state))
}
