//! One-shot question from the terminal

use crate::api::query::NO_ANSWER_MESSAGE;
use crate::server::{build_api_state, load_config};
use anyhow::{Context, Result};
use tutor_core::{format_error_for_chat, ExecutionStatus, OrchestratorInput};

pub async fn run(question: &str, user: &str, trace: bool) -> Result<()> {
    let question = question.trim();
    anyhow::ensure!(!question.is_empty(), "Please provide a valid question.");

    let config = load_config().context("Failed to load configuration")?;
    let (_, state) = build_api_state(&config).await;
    let orchestrator = state.orchestrator.context(
        "No Gemini credentials found. Set GOOGLE_AI_API_KEY or GOOGLE_CLOUD_PROJECT in .env",
    )?;

    let result = match orchestrator
        .process(OrchestratorInput::new(user, question))
        .await
    {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", format_error_for_chat(&e));
            return Err(e.into());
        }
    };

    if trace {
        for call in &result.tool_calls {
            let marker = if call.success { "✓" } else { "✗" };
            eprintln!(
                "{marker} {} → {} {} ({}ms)",
                call.agent, call.tool_name, call.input, call.duration_ms
            );
        }
    }

    if result.status == ExecutionStatus::Completed {
        println!("{}", result.response);
    } else {
        println!("{NO_ANSWER_MESSAGE}");
    }
    Ok(())
}
