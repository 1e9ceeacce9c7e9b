//! Server configuration types
//!
//! Every field has a serde default so a partial override file or a single
//! `TUTOR_*` variable never has to restate the rest.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tutor_core::OrchestratorConfig;
use tutor_tools::RunnerConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorAppConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Orchestrator settings assembled from the `llm`, `orchestrator`,
    /// `tools` and `session` sections
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        let mut config = OrchestratorConfig::default()
            .with_max_iterations(self.orchestrator.max_iterations)
            .with_specialist_max_iterations(self.orchestrator.specialist_max_iterations)
            .with_max_execution_secs(self.orchestrator.max_execution_secs)
            .with_model(self.llm.model.clone())
            .with_runner_config(RunnerConfig::new(Duration::from_secs(self.tools.timeout_secs)))
            .with_max_session_messages(self.session.max_messages);
        config.temperature = self.llm.temperature;
        config.max_tokens = Some(self.llm.max_tokens);
        config
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding `index.html` and the assets under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_static_dir() -> String {
    "static".to_string()
}

/// Model settings; credentials come from the environment, never from here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    tutor_llm::gemini::DEFAULT_MODEL.to_string()
}
fn default_max_tokens() -> u32 {
    8192
}
fn default_llm_timeout_secs() -> u64 {
    60
}

/// Agent loop limits (exposed to TOML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorAppConfig {
    /// Maximum model turns for the root agent
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Maximum model turns for each specialist
    #[serde(default = "default_specialist_max_iterations")]
    pub specialist_max_iterations: usize,
    /// Maximum total execution time in seconds (0 = no limit)
    #[serde(default = "default_max_execution_secs")]
    pub max_execution_secs: u64,
}

impl Default for OrchestratorAppConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            specialist_max_iterations: default_specialist_max_iterations(),
            max_execution_secs: default_max_execution_secs(),
        }
    }
}

fn default_max_iterations() -> usize {
    10
}
fn default_specialist_max_iterations() -> usize {
    5
}
fn default_max_execution_secs() -> u64 {
    120
}

/// Deterministic tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_tool_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_tool_timeout_secs(),
        }
    }
}

fn default_tool_timeout_secs() -> u64 {
    30
}

/// Conversation memory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            ttl_hours: default_ttl_hours(),
        }
    }
}

fn default_max_messages() -> usize {
    tutor_core::memory::DEFAULT_MAX_MESSAGES
}
fn default_ttl_hours() -> u64 {
    24
}
