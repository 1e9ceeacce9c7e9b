//! Server module for the tutor
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `auth`: Gemini credential resolution and setup hints
//! - `init`: Agent tree assembly, router and run loop

mod auth;
pub mod config;
mod init;
mod loader;

pub use init::{build_api_state, build_tool_registry, run};
pub use loader::load_config;
