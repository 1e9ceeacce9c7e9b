//! Tools API endpoint
//!
//! GET /api/tools - List the deterministic tools the specialists can call

use axum::extract::Extension;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::ApiState;

/// Tool information for API response
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    /// Tool name (identifier)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Tool category
    pub category: String,
    /// Parameter schema (JSON Schema)
    pub parameters: serde_json::Value,
}

async fn list_tools(Extension(state): Extension<ApiState>) -> Json<Vec<ToolInfo>> {
    let tools = state
        .tools
        .list_definitions()
        .into_iter()
        .map(|def| ToolInfo {
            name: def.name.clone(),
            description: def.description.clone(),
            category: def.category.to_string(),
            parameters: def.parameters.clone(),
        })
        .collect();

    Json(tools)
}

/// Create tools routes
pub fn tools_routes() -> Router {
    Router::new().route("/api/tools", get(list_tools))
}

#[cfg(test)]
mod tests {
    use super::super::{api_router, test_support};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_tools() {
        let response = api_router(test_support::unconfigured())
            .oneshot(Request::builder().uri("/api/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = test_support::body_json(response).await;

        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        for expected in ["calculator", "elements_lookup", "lookup_physics_constant", "web_search"] {
            assert!(names.contains(&expected), "{expected}");
        }

        let calculator = body
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["name"] == "calculator")
            .unwrap();
        assert_eq!(calculator["parameters"]["type"], "object");
        assert!(calculator["category"].is_string());
    }
}
