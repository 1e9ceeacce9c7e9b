//! Tutor Tools - Deterministic tools and execution engine
//!
//! This crate provides the tool system for the tutor:
//! - Outcome: the uniform success/error shape every tool returns
//! - Builtins: calculator, element lookup, physics constants, web search
//! - Registry: Tool registration and discovery
//! - Runner: Tool execution with timeouts

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod outcome;
pub mod registry;
pub mod runner;

pub use builtins::register_builtins;
pub use error::{Error, Result};
pub use outcome::{Listing, ToolFailure, ToolOutcome};
pub use registry::{Tool, ToolCategory, ToolDefinition, ToolRegistry, ToolResult};
pub use runner::{ExecutionResult, RunnerConfig, ToolRunner};
