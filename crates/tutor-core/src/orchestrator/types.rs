//! Orchestrator types

use crate::agents::ToolCallRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// A final answer was produced
    Completed,
    /// The model finished without any answer text
    Failed,
}

/// Result of an orchestrated execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Execution ID
    pub execution_id: Uuid,
    /// Final status
    pub status: ExecutionStatus,
    /// Response text
    pub response: String,
    /// Tool calls made, each delegation followed by the specialist's own calls
    pub tool_calls: Vec<ToolCallRecord>,
    /// Root agent model turns
    pub iterations: usize,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
    /// Model used
    pub model: String,
}

impl ExecutionResult {
    /// Whether a final answer was produced
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == ExecutionStatus::Completed
    }
}

/// Inline the specialist calls carried in each delegation's output
pub(crate) fn flatten_records(records: Vec<ToolCallRecord>) -> Vec<ToolCallRecord> {
    let mut flat = Vec::with_capacity(records.len());
    for record in records {
        let nested: Vec<ToolCallRecord> = record
            .output
            .get("tool_calls")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        flat.push(record);
        flat.extend(nested);
    }
    flat
}
