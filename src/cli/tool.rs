//! Direct tool invocation, bypassing the agents

use crate::server::build_tool_registry;
use anyhow::{Context, Result};
use tutor_tools::ToolRunner;

pub async fn run(name: &str, input: &str) -> Result<()> {
    let input: serde_json::Value =
        serde_json::from_str(input).context("Tool input must be a JSON object")?;

    let runner = ToolRunner::with_defaults(build_tool_registry());
    let exec = runner
        .execute(name, input)
        .await
        .with_context(|| format!("Failed to run tool '{name}'"))?;

    println!("{}", serde_json::to_string_pretty(&exec.result.output)?);
    Ok(())
}

pub fn list() -> Result<()> {
    let registry = build_tool_registry();
    for def in registry.list_definitions() {
        println!("{:<26} [{}] {}", def.name, def.category, def.description);
    }
    Ok(())
}
