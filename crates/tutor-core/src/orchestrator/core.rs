//! Orchestrator core structure
//!
//! Builds the agent tree: one agent per specialist over the deterministic
//! tools, and a root agent whose tools are those specialists.

use crate::agents::{
    root_spec, specialist_specs, Agent, AgentConfig, DelegateTool, ROOT_AGENT_NAME,
};
use crate::memory::{MemoryStore, SessionStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;
use tutor_llm::LlmProvider;
use tutor_tools::{RunnerConfig, ToolRegistry};

use super::config::OrchestratorConfig;

/// Main orchestrator that routes questions through the specialists
pub struct Orchestrator {
    pub(crate) root: Agent,
    pub(crate) specialists: Vec<Arc<Agent>>,
    pub(crate) memory: Arc<dyn SessionStore>,
    pub(crate) config: OrchestratorConfig,
    /// One lock per session key so a user's turns are applied in order
    session_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Orchestrator {
    /// Create an orchestrator where every agent shares one provider
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: &ToolRegistry,
        config: OrchestratorConfig,
    ) -> Self {
        Self::with_provider_fn(tools, config, move |_| provider.clone())
    }

    /// Create an orchestrator choosing a provider per agent name
    #[must_use]
    pub fn with_provider_fn<F>(tools: &ToolRegistry, config: OrchestratorConfig, provider_for: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn LlmProvider>,
    {
        let base = AgentConfig {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            ..AgentConfig::default()
        };

        let specialist_config = AgentConfig {
            max_iterations: config.specialist_max_iterations,
            runner_config: config.runner_config.clone(),
            ..base.clone()
        };
        let specialists: Vec<Arc<Agent>> = specialist_specs()
            .into_iter()
            .map(|spec| {
                let provider = provider_for(&spec.name);
                Arc::new(Agent::new(spec, provider, tools, specialist_config.clone()))
            })
            .collect();

        let mut delegates = ToolRegistry::new();
        for agent in &specialists {
            delegates.register(Arc::new(DelegateTool::new(agent.clone())));
        }

        let delegation_timeout = config.delegation_timeout();
        let root_config = AgentConfig {
            max_iterations: config.max_iterations,
            runner_config: RunnerConfig::new(delegation_timeout).with_max_timeout(delegation_timeout),
            ..base
        };
        let root = Agent::new(
            root_spec(),
            provider_for(ROOT_AGENT_NAME),
            &delegates,
            root_config,
        );

        info!(
            root = %ROOT_AGENT_NAME,
            specialists = specialists.len(),
            "Orchestrator ready"
        );

        Self {
            root,
            specialists,
            memory: Arc::new(MemoryStore::new()),
            config,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Set the session store
    #[must_use]
    pub fn with_memory(mut self, memory: Arc<dyn SessionStore>) -> Self {
        self.memory = memory;
        self
    }

    /// Get the session store
    #[must_use]
    pub fn memory(&self) -> &Arc<dyn SessionStore> {
        &self.memory
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// The root agent
    #[must_use]
    pub fn root(&self) -> &Agent {
        &self.root
    }

    /// Wait for exclusive use of a session key
    pub(crate) async fn lock_session(&self, session_key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.session_locks.lock().await;
            // Idle keys hold the only reference
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(session_key.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Specialist names in roster order
    #[must_use]
    pub fn specialist_names(&self) -> Vec<&str> {
        self.specialists.iter().map(|a| a.name()).collect()
    }
}
