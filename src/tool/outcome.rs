// ABOUTME: Defines the ToolOutcome type - the terminal result value of a
// ABOUTME: single tool invocation attempt, never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal status of a tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Completed,
    Failed,
    Unauthorized,
}

/// Result of a single tool invocation attempt.
///
/// Produced exactly once per attempt by the gate, whatever happens
/// during the checks or dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub tool_id: String,

    /// Call identifier supplied by the requester.
    pub call_id: String,

    pub status: ToolStatus,

    /// Opaque result payload on success.
    pub output: Option<serde_json::Value>,

    /// Error description on failure.
    pub error: Option<String>,

    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl ToolOutcome {
    /// Create a successful outcome.
    pub fn completed(
        tool_id: impl Into<String>,
        call_id: impl Into<String>,
        output: serde_json::Value,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tool_id: tool_id.into(),
            call_id: call_id.into(),
            status: ToolStatus::Completed,
            output: Some(output),
            error: None,
            started_at,
            completed_at: Utc::now(),
        }
    }

    /// Create a failed outcome with an error description.
    pub fn failed(
        tool_id: impl Into<String>,
        call_id: impl Into<String>,
        error: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tool_id: tool_id.into(),
            call_id: call_id.into(),
            status: ToolStatus::Failed,
            output: None,
            error: Some(error.into()),
            started_at,
            completed_at: Utc::now(),
        }
    }

    /// Create an unauthorized outcome.
    pub fn unauthorized(
        tool_id: impl Into<String>,
        call_id: impl Into<String>,
        error: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tool_id: tool_id.into(),
            call_id: call_id.into(),
            status: ToolStatus::Unauthorized,
            output: None,
            error: Some(error.into()),
            started_at,
            completed_at: Utc::now(),
        }
    }

    /// Check whether the invocation completed successfully.
    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Completed
    }
}
