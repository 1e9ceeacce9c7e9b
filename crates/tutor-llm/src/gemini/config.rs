//! Gemini provider configuration

use crate::error::{Error, Result};
use crate::util::mask_api_key;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// AI Studio API base URL
pub(crate) const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Region used when `GOOGLE_CLOUD_LOCATION` is unset
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Models the tutor is known to work with
pub const MODELS: &[&str] = &[
    "gemini-2.0-flash-001",
    "gemini-2.0-flash",
    "gemini-2.5-flash",
    "gemini-2.5-pro",
];

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

const DEFAULT_MAX_TOKENS: u32 = 8192;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// API key variables, highest precedence first
const API_KEY_VARS: &[&str] = &["GOOGLE_AI_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Authentication method for Gemini API
#[derive(Clone, PartialEq, Eq)]
pub enum GeminiAuth {
    /// AI Studio API key (sent as the `key` query parameter)
    ApiKey(String),
    /// Vertex AI project credentials with an OAuth bearer token
    VertexAi {
        /// Google Cloud project id
        project: String,
        /// Region, e.g. `us-central1`
        location: String,
        /// Short-lived access token
        access_token: String,
    },
}

impl GeminiAuth {
    /// Short label for logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "api_key",
            Self::VertexAi { .. } => "vertex_ai",
        }
    }
}

// SECURITY: credentials never reach Debug output
impl fmt::Debug for GeminiAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(key) => write!(f, "ApiKey({})", mask_api_key(key)),
            Self::VertexAi {
                project,
                location,
                access_token,
            } => f
                .debug_struct("VertexAi")
                .field("project", project)
                .field("location", location)
                .field("access_token", &mask_api_key(access_token))
                .finish(),
        }
    }
}

/// Gemini provider configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// Authentication method
    pub auth: GeminiAuth,
    /// Base URL (API key auth only)
    pub base_url: String,
    /// Default model
    pub default_model: String,
    /// Default max tokens
    pub default_max_tokens: u32,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("auth", &self.auth)
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Create a new configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_auth(GeminiAuth::ApiKey(api_key.into()))
    }

    /// Create a configuration for Vertex AI
    #[must_use]
    pub fn vertex(
        project: impl Into<String>,
        location: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self::with_auth(GeminiAuth::VertexAi {
            project: project.into(),
            location: location.into(),
            access_token: access_token.into(),
        })
    }

    fn with_auth(auth: GeminiAuth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            default_max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Priority:
    /// 1. `GOOGLE_AI_API_KEY`, `GEMINI_API_KEY`, `GOOGLE_API_KEY`
    /// 2. `GOOGLE_CLOUD_PROJECT` (+ `GOOGLE_CLOUD_LOCATION`) with a token from
    ///    `GOOGLE_CLOUD_ACCESS_TOKEN` or `gcloud auth print-access-token`
    pub async fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok()).await
    }

    /// Same as [`Self::from_env`] with an injectable variable source
    pub async fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for var in API_KEY_VARS {
            if let Some(key) = non_empty(var) {
                info!(source = %var, "Using Google AI API key");
                return Ok(Self::new(key));
            }
        }

        let Some(project) = non_empty("GOOGLE_CLOUD_PROJECT") else {
            return Err(Error::NotConfigured(
                "no Google AI API key or GOOGLE_CLOUD_PROJECT set".to_string(),
            ));
        };
        let location =
            non_empty("GOOGLE_CLOUD_LOCATION").unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        let access_token = match non_empty("GOOGLE_CLOUD_ACCESS_TOKEN") {
            Some(token) => token,
            None => gcloud_access_token().await?,
        };

        info!(project = %project, location = %location, "Using Vertex AI credentials");
        Ok(Self::vertex(project, location, access_token))
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the default max tokens
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `generateContent` URL for a model, without credentials
    #[must_use]
    pub fn endpoint(&self, model: &str) -> String {
        match &self.auth {
            GeminiAuth::ApiKey(_) => {
                format!("{}/models/{}:generateContent", self.base_url, model)
            }
            GeminiAuth::VertexAi {
                project, location, ..
            } => format!(
                "https://{location}-aiplatform.googleapis.com/v1/projects/{project}\
                 /locations/{location}/publishers/google/models/{model}:generateContent"
            ),
        }
    }
}

/// Ask the Cloud SDK for a fresh access token
pub(crate) async fn gcloud_access_token() -> Result<String> {
    debug!("Requesting access token from gcloud");
    let output = tokio::process::Command::new("gcloud")
        .args(["auth", "print-access-token"])
        .output()
        .await
        .map_err(|e| Error::NotConfigured(format!("gcloud not available: {e}")))?;

    if !output.status.success() {
        return Err(Error::NotConfigured(
            "gcloud auth print-access-token failed; run `gcloud auth login`".to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::NotConfigured(
            "gcloud returned an empty access token".to_string(),
        ));
    }
    Ok(token)
}
