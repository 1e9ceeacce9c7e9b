//! Orchestrator configuration

use crate::memory::{SessionContext, DEFAULT_MAX_MESSAGES};
use std::time::Duration;
use tutor_tools::RunnerConfig;

/// User id reported for requests that carry no conversation owner
pub const ANONYMOUS_USER_ID: &str = "web_user";

/// Input for orchestration
#[derive(Debug, Clone)]
pub struct OrchestratorInput {
    /// User ID
    pub user_id: String,
    /// Question text
    pub text: String,
    /// Load and save the user's session; anonymous requests start empty and leave nothing behind
    pub persist: bool,
}

impl OrchestratorInput {
    /// Create a new input bound to the user's session
    #[must_use]
    pub fn new(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            text: text.into(),
            persist: true,
        }
    }

    /// Create a one-off input with no session history
    #[must_use]
    pub fn anonymous(text: impl Into<String>) -> Self {
        Self {
            user_id: ANONYMOUS_USER_ID.to_string(),
            text: text.into(),
            persist: false,
        }
    }

    /// Get the session key
    #[must_use]
    pub fn session_key(&self) -> String {
        SessionContext::make_key(&self.user_id)
    }
}

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum model turns for the root agent
    pub max_iterations: usize,
    /// Maximum model turns for each specialist
    pub specialist_max_iterations: usize,
    /// Deadline for one whole request in seconds (0 = no limit)
    pub max_execution_secs: u64,
    /// Model name; empty uses the provider default
    pub model: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Output token cap
    pub max_tokens: Option<u32>,
    /// Timeouts for the specialists' deterministic tools
    pub runner_config: RunnerConfig,
    /// Message cap for new sessions
    pub max_session_messages: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            specialist_max_iterations: 5,
            max_execution_secs: 120,
            model: String::new(),
            temperature: None,
            max_tokens: None,
            runner_config: RunnerConfig::default(),
            max_session_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}

impl OrchestratorConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations for the root agent
    #[must_use]
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set maximum iterations for specialists
    #[must_use]
    pub fn with_specialist_max_iterations(mut self, max: usize) -> Self {
        self.specialist_max_iterations = max;
        self
    }

    /// Set the whole-request deadline
    #[must_use]
    pub fn with_max_execution_secs(mut self, secs: u64) -> Self {
        self.max_execution_secs = secs;
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set runner configuration
    #[must_use]
    pub fn with_runner_config(mut self, config: RunnerConfig) -> Self {
        self.runner_config = config;
        self
    }

    /// Set the session message cap
    #[must_use]
    pub fn with_max_session_messages(mut self, max: usize) -> Self {
        self.max_session_messages = max;
        self
    }

    /// Timeout for one delegation: the request deadline, or the runner's
    /// ceiling when there is none
    pub(crate) fn delegation_timeout(&self) -> Duration {
        if self.max_execution_secs == 0 {
            self.runner_config.max_timeout
        } else {
            Duration::from_secs(self.max_execution_secs)
        }
    }
}
