//! Agents - tool-calling loop, specialist roster and delegation
//!
//! - `agent`: the generic loop that lets a model call tools until it answers
//! - `specialists`: the fixed roster of domain tutors
//! - `delegate`: exposes an agent as a tool of another agent

mod agent;
mod delegate;
mod prompts;
mod specialists;

pub use agent::{Agent, AgentConfig, AgentRun, AgentSpec, ToolCallRecord};
pub use delegate::DelegateTool;
pub use specialists::{root_spec, specialist_specs, ROOT_AGENT_NAME, SPECIALIST_NAMES};
