//! Tutor Core - Orchestration Engine
//!
//! This crate provides the agent layer of the tutor:
//! - Agents: the tool-calling loop, the specialist roster and delegation
//! - Orchestrator: the root agent that routes questions to specialists
//! - Memory: per-user conversation sessions

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agents;
pub mod error;
pub mod memory;
pub mod orchestrator;

pub use agents::{
    Agent, AgentConfig, AgentRun, AgentSpec, DelegateTool, ToolCallRecord, SPECIALIST_NAMES,
};
pub use error::{format_error_for_chat, Error, Result, UserFriendlyError};
pub use memory::{MemoryStore, SessionContext, SessionStore};
pub use orchestrator::{
    ExecutionResult, ExecutionStatus, Orchestrator, OrchestratorConfig, OrchestratorInput,
    ANONYMOUS_USER_ID,
};
