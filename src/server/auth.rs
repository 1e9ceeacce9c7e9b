//! Credential setup
//!
//! Resolves Gemini credentials from the environment. A missing credential is
//! not fatal: the server starts degraded and answers every query with a
//! setup hint.

use super::config::LlmConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tutor_llm::{GeminiAuth, GeminiConfig, GeminiProvider, LlmProvider};

/// Which credential the service runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    ApiKey,
    VertexAi { project: String, location: String },
    NotConfigured,
}

impl AuthStatus {
    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::NotConfigured)
    }

    pub fn as_str(&self) -> &'static str {
        if self.is_configured() {
            "configured"
        } else {
            "not_configured"
        }
    }
}

impl From<&GeminiAuth> for AuthStatus {
    fn from(auth: &GeminiAuth) -> Self {
        match auth {
            GeminiAuth::ApiKey(_) => Self::ApiKey,
            GeminiAuth::VertexAi {
                project, location, ..
            } => Self::VertexAi {
                project: project.clone(),
                location: location.clone(),
            },
        }
    }
}

/// Build the Gemini provider from the environment, if credentials exist
pub async fn resolve_provider(llm: &LlmConfig) -> (AuthStatus, Option<Arc<dyn LlmProvider>>) {
    let gemini_config = match GeminiConfig::from_env().await {
        Ok(config) => config
            .with_model(llm.model.clone())
            .with_max_tokens(llm.max_tokens)
            .with_timeout(Duration::from_secs(llm.timeout_secs)),
        Err(e) => {
            warn!(error = %e, "Gemini credentials not found");
            log_setup_instructions();
            return (AuthStatus::NotConfigured, None);
        }
    };

    let status = AuthStatus::from(&gemini_config.auth);
    match GeminiProvider::new(gemini_config) {
        Ok(provider) => {
            match &status {
                AuthStatus::VertexAi { project, location } => {
                    info!(project = %project, location = %location, model = %llm.model, "Using Vertex AI");
                }
                _ => info!(model = %llm.model, "Using Google AI Studio API key"),
            }
            let provider: Arc<dyn LlmProvider> = Arc::new(provider);
            (status, Some(provider))
        }
        Err(e) => {
            warn!(error = %e, "Failed to create Gemini provider");
            (AuthStatus::NotConfigured, None)
        }
    }
}

fn log_setup_instructions() {
    warn!("AUTHENTICATION REQUIRED: configure Google AI or Vertex AI credentials in .env");
    warn!("Option 1 (development): GOOGLE_AI_API_KEY=your_api_key_here");
    warn!("  Get a key at https://aistudio.google.com/app/apikey");
    warn!("Option 2 (Google Cloud): GOOGLE_CLOUD_PROJECT=your_project_id");
    warn!("  GOOGLE_CLOUD_LOCATION=us-central1, then run `gcloud auth login`");
    warn!("The server will start, but queries are refused until credentials are set");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(AuthStatus::ApiKey.as_str(), "configured");
        assert_eq!(AuthStatus::NotConfigured.as_str(), "not_configured");
        assert!(!AuthStatus::NotConfigured.is_configured());
    }

    #[test]
    fn test_status_from_auth_drops_secrets() {
        let auth = GeminiAuth::VertexAi {
            project: "demo".to_string(),
            location: "europe-west4".to_string(),
            access_token: "ya29.secret".to_string(),
        };
        assert_eq!(
            AuthStatus::from(&auth),
            AuthStatus::VertexAi {
                project: "demo".to_string(),
                location: "europe-west4".to_string(),
            }
        );
        assert_eq!(AuthStatus::from(&GeminiAuth::ApiKey("k".into())), AuthStatus::ApiKey);
    }
}
