//! Builtins - Built-in tutoring tools
//!
//! - calculator: four-function arithmetic
//! - elements_lookup: periodic table data
//! - lookup_physics_constant: fundamental constants
//! - web_search: recent news for the news specialist

pub mod calculator;
pub mod constants;
pub mod elements;
mod web_search;

pub use calculator::CalculatorTool;
pub use constants::PhysicsConstantTool;
pub use elements::ElementsLookupTool;
pub use web_search::WebSearchTool;

use crate::registry::ToolRegistry;
use std::sync::Arc;

/// Register all built-in tools
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(Arc::new(CalculatorTool::new()));
    registry.register(Arc::new(ElementsLookupTool::new()));
    registry.register(Arc::new(PhysicsConstantTool::new()));
    registry.register(Arc::new(WebSearchTool::new()));
}
