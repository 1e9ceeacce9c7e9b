//! Orchestrator request handling

use crate::agents::AgentRun;
use crate::error::{Error, Result};
use crate::memory::{SessionContext, SessionStore};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tutor_llm::Message;
use uuid::Uuid;

use super::config::OrchestratorInput;
use super::core::Orchestrator;
use super::types::{flatten_records, ExecutionResult, ExecutionStatus};

impl Orchestrator {
    /// Answer one question in the context of the user's session
    #[tracing::instrument(skip(self, input), fields(user = %input.user_id))]
    pub async fn process(&self, input: OrchestratorInput) -> Result<ExecutionResult> {
        let start = Instant::now();
        let execution_id = Uuid::new_v4();
        let session_key = input.session_key();

        info!(execution_id = %execution_id, "Starting execution");

        // Turns of one user are applied one at a time, from load to save
        let _session_guard = if input.persist {
            Some(self.lock_session(&session_key).await)
        } else {
            None
        };

        let mut session = if input.persist {
            self.load_session(&session_key).await
        } else {
            debug!("Anonymous request, no session history");
            self.new_session(&session_key)
        };
        let history: Vec<Message> = session.get_messages().to_vec();

        let run = self
            .run_root(&history, &input.text)
            .await
            .inspect_err(|e| {
                error!(execution_id = %execution_id, error = %e, "Execution failed");
            })?;

        let status = if run.response.trim().is_empty() {
            ExecutionStatus::Failed
        } else {
            ExecutionStatus::Completed
        };

        session.add_user_message(&input.text);
        if status == ExecutionStatus::Completed {
            session.add_assistant_message(&run.response);
        }
        if input.persist {
            if let Err(e) = self.memory.save(&session).await {
                warn!(session_key = %session_key, error = %e, "Failed to save session");
            }
        }

        let tool_calls = flatten_records(run.tool_calls);
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            execution_id = %execution_id,
            status = ?status,
            iterations = run.iterations,
            tool_calls = tool_calls.len(),
            duration_ms,
            "Execution finished"
        );

        Ok(ExecutionResult {
            execution_id,
            status,
            response: run.response,
            tool_calls,
            iterations: run.iterations,
            duration_ms,
            model: run.model,
        })
    }

    async fn load_session(&self, session_key: &str) -> SessionContext {
        match self.memory.get(session_key).await {
            Ok(Some(s)) => {
                debug!(session_key = %session_key, messages = s.len(), "Session loaded");
                s
            }
            Ok(None) => self.new_session(session_key),
            Err(e) => {
                warn!(session_key = %session_key, error = %e, "Failed to load session, creating new");
                self.new_session(session_key)
            }
        }
    }

    fn new_session(&self, session_key: &str) -> SessionContext {
        SessionContext::new(session_key).with_max_messages(self.config.max_session_messages)
    }

    async fn run_root(&self, history: &[Message], text: &str) -> Result<AgentRun> {
        let secs = self.config.max_execution_secs;
        if secs == 0 {
            return self.root.run(history, text).await;
        }
        tokio::time::timeout(Duration::from_secs(secs), self.root.run(history, text))
            .await
            .map_err(|_| Error::Timeout(secs))?
    }
}
