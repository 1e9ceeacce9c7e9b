//! Orchestrator - Root agent and request handling
//!
//! # Module Structure
//!
//! - `types`: Execution results
//! - `config`: OrchestratorConfig, OrchestratorInput
//! - `core`: Orchestrator struct and construction of the agent tree
//! - `process`: per-request execution with session memory

mod config;
mod core;
mod process;
mod types;

#[cfg(test)]
mod tests;

pub use config::{OrchestratorConfig, OrchestratorInput, ANONYMOUS_USER_ID};
pub use core::Orchestrator;
pub use types::{ExecutionResult, ExecutionStatus};
