//! CLI module for the tutor
//!
//! - `serve`: run the HTTP server
//! - `ask`: answer one question from the terminal
//! - `tool`: call a deterministic tool directly
//! - `tools`: list the registered tools

use clap::{Parser, Subcommand};

pub mod ask;
pub mod tool;

/// Multi-agent AI tutor
#[derive(Parser, Debug)]
#[command(name = "tutor")]
#[command(about = "Multi-agent AI tutor for maths, physics, chemistry and tech news")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve,
    /// Ask a single question and print the answer
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        /// Conversation owner
        #[arg(long, default_value = "cli_user")]
        user: String,
        /// Also print the tool calls made to reach the answer
        #[arg(long)]
        trace: bool,
    },
    /// Run a tool with JSON arguments and print its output
    Tool {
        /// Tool name, e.g. `calculator`
        name: String,
        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        input: String,
    },
    /// List registered tools
    Tools,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) => crate::server::run().await,
        Some(Commands::Ask {
            question,
            user,
            trace,
        }) => ask::run(&question.join(" "), &user, trace).await,
        Some(Commands::Tool { name, input }) => tool::run(&name, &input).await,
        Some(Commands::Tools) => tool::list(),
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::parse_from(["tutor", "ask", "What", "is", "pi?", "--trace"]);
        match cli.command {
            Some(Commands::Ask {
                question,
                user,
                trace,
            }) => {
                assert_eq!(question.join(" "), "What is pi?");
                assert_eq!(user, "cli_user");
                assert!(trace);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_tool_default_input() {
        let cli = Cli::parse_from(["tutor", "tool", "elements_lookup"]);
        match cli.command {
            Some(Commands::Tool { name, input }) => {
                assert_eq!(name, "elements_lookup");
                assert_eq!(input, "{}");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
