// ABOUTME: Job model - status state machine, execution context, action
// ABOUTME: items, and the terminal outcome of a job.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::llm::Usage;
use crate::tool::ToolOutcome;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Execution status of a job.
///
/// Transitions: Pending -> Running -> {Completed, Failed, Cancelled}.
/// The last three are terminal; there is no transition out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Returns true for Completed, Failed, and Cancelled.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// Check whether a transition from this status to `next` is valid.
    pub fn can_transition(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Pending, JobStatus::Running)
                | (
                    JobStatus::Running,
                    JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
                )
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One rendered message from the conversation a job runs in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextMessage {
    pub role: String,
    pub content: String,
}

impl ContextMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Context a job carries into execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Chat the triggering message belongs to.
    pub chat_id: String,

    /// Thread within the chat, if any.
    pub thread_id: Option<String>,

    /// Sender of the triggering message, if any.
    pub sender_id: Option<String>,

    /// Snapshot of recent conversation messages.
    pub recent_messages: Vec<ContextMessage>,

    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExecutionContext {
    pub fn new(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            ..Default::default()
        }
    }
}

/// A job: one request to an agent to perform an instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier. Generated when not supplied.
    pub id: String,

    /// Agent this job targets.
    pub agent_id: String,

    /// The instruction to carry out.
    pub instruction: String,

    pub context: ExecutionContext,

    /// Tool ids this job is permitted to invoke.
    pub tools_allowed: Vec<String>,

    /// Budget for the backend call.
    pub timeout: Duration,

    /// Retry budget. Not driven by the runtime; owned by the caller.
    pub max_retries: u32,
    pub retry_count: u32,

    pub status: JobStatus,

    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Create a job with a generated id and default budgets.
    pub fn new(agent_id: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            agent_id: agent_id.into(),
            instruction: instruction.into(),
            context: ExecutionContext::default(),
            tools_allowed: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: 3,
            retry_count: 0,
            status: JobStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    /// Override the generated id with a caller-supplied one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the execution context.
    pub fn context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    /// Set the permitted tool ids.
    pub fn tools_allowed(mut self, tools: Vec<String>) -> Self {
        self.tools_allowed = tools;
        self
    }

    /// Set the timeout budget for the backend call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry budget.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Transition Pending -> Running, stamping `started_at` once.
    ///
    /// Returns false (changing nothing) from any other status.
    pub fn start(&mut self) -> bool {
        self.transition(JobStatus::Running)
    }

    /// Transition Running -> Completed, stamping `completed_at`.
    pub fn complete(&mut self) -> bool {
        self.transition(JobStatus::Completed)
    }

    /// Transition Running -> Failed, stamping `completed_at`.
    pub fn fail(&mut self) -> bool {
        self.transition(JobStatus::Failed)
    }

    /// Transition Running -> Cancelled, stamping `completed_at`.
    pub fn cancel(&mut self) -> bool {
        self.transition(JobStatus::Cancelled)
    }

    fn transition(&mut self, next: JobStatus) -> bool {
        if !self.status.can_transition(next) {
            return false;
        }
        self.status = next;
        match next {
            JobStatus::Running => self.started_at = Some(Utc::now()),
            s if s.is_terminal() => self.completed_at = Some(Utc::now()),
            _ => {}
        }
        true
    }
}

/// Priority of an action item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// An action item derived from a job's response text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub description: String,
    pub assignee: Option<String>,
    pub priority: Priority,
}

impl ActionItem {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            assignee: None,
            priority: Priority::default(),
        }
    }
}

/// Terminal result of a job, produced exactly once per submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutcome {
    pub job_id: String,
    pub agent_id: String,
    pub status: JobStatus,

    /// Generated response text. Empty unless status is Completed.
    pub response: String,

    pub action_items: Vec<ActionItem>,

    /// Outcomes of any tool calls requested during execution.
    pub tool_outcomes: Vec<ToolOutcome>,

    /// Error description. Present iff status is Failed.
    pub error: Option<String>,

    pub usage: Usage,

    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobOutcome {
    /// Build a completed outcome from a finished job.
    pub fn completed(
        job: &Job,
        response: String,
        action_items: Vec<ActionItem>,
        tool_outcomes: Vec<ToolOutcome>,
        usage: Usage,
    ) -> Self {
        Self {
            job_id: job.id.clone(),
            agent_id: job.agent_id.clone(),
            status: JobStatus::Completed,
            response,
            action_items,
            tool_outcomes,
            error: None,
            usage,
            started_at: job.started_at,
            completed_at: job.completed_at,
        }
    }

    /// Build a failed outcome carrying an error description.
    pub fn failed(job: &Job, error: impl Into<String>) -> Self {
        Self {
            job_id: job.id.clone(),
            agent_id: job.agent_id.clone(),
            status: JobStatus::Failed,
            response: String::new(),
            action_items: Vec::new(),
            tool_outcomes: Vec::new(),
            error: Some(error.into()),
            usage: Usage::default(),
            started_at: job.started_at,
            completed_at: job.completed_at,
        }
    }

    /// Build a cancelled outcome. Never carries an error string.
    pub fn cancelled(job: &Job) -> Self {
        Self {
            job_id: job.id.clone(),
            agent_id: job.agent_id.clone(),
            status: JobStatus::Cancelled,
            response: String::new(),
            action_items: Vec::new(),
            tool_outcomes: Vec::new(),
            error: None,
            usage: Usage::default(),
            started_at: job.started_at,
            completed_at: job.completed_at,
        }
    }
}
