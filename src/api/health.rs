//! Health check endpoint
//!
//! `/health` reports whether credentials were found and which specialists
//! are available.

use axum::extract::Extension;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use super::ApiState;

/// Subject areas served when the agent tree is up
const AGENT_AREAS: [&str; 4] = ["mathematics", "physics", "chemistry", "news_analyst"];

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub authentication: &'static str,
    pub agents: Vec<&'static str>,
}

async fn health_check(Extension(state): Extension<ApiState>) -> Json<HealthResponse> {
    let configured = state.is_configured();
    Json(HealthResponse {
        status: if configured { "healthy" } else { "degraded" },
        service: "AI Tutor",
        version: env!("CARGO_PKG_VERSION"),
        authentication: if configured {
            "configured"
        } else {
            "not_configured"
        },
        agents: if configured {
            AGENT_AREAS.to_vec()
        } else {
            Vec::new()
        },
    })
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::super::{api_router, test_support};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use tutor_llm::MockProvider;

    async fn get_health(state: super::ApiState) -> serde_json::Value {
        let response = api_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        test_support::body_json(response).await
    }

    #[tokio::test]
    async fn test_health_configured() {
        let body = get_health(test_support::configured(MockProvider::new())).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "AI Tutor");
        assert_eq!(body["authentication"], "configured");
        assert_eq!(
            body["agents"],
            serde_json::json!(["mathematics", "physics", "chemistry", "news_analyst"])
        );
    }

    #[tokio::test]
    async fn test_health_degraded() {
        let body = get_health(test_support::unconfigured()).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["authentication"], "not_configured");
        assert_eq!(body["agents"], serde_json::json!([]));
    }
}
