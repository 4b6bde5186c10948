// ABOUTME: Tool descriptor and call context types - the static contract a
// ABOUTME: tool declares and the identity carried into every invocation.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(60);

/// Categories of tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    Memory,
    Search,
    Web,
    Code,
    File,
    Messaging,
    Scheduling,
}

/// Static descriptor of an executable tool.
///
/// Immutable once registered; the registry rejects duplicate ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique identifier within the registry.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    pub category: ToolCategory,

    /// Description shown to the LLM.
    pub description: String,

    /// JSON Schema for the tool's input parameters.
    pub input_schema: serde_json::Value,

    /// Whether invocation requires an authenticated caller.
    pub requires_auth: bool,

    /// Maximum calls per rolling window. None means unlimited.
    pub rate_limit: Option<u32>,

    /// Length of the rolling rate-limit window.
    pub rate_window: Duration,

    /// Inactive tools are excluded from default listings.
    pub is_active: bool,

    pub metadata: HashMap<String, serde_json::Value>,
}

impl ToolDescriptor {
    /// Create a descriptor with required fields and defaults for the rest.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ToolCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: description.into(),
            input_schema: serde_json::json!({"type": "object"}),
            requires_auth: false,
            rate_limit: None,
            rate_window: DEFAULT_RATE_WINDOW,
            is_active: true,
            metadata: HashMap::new(),
        }
    }

    /// Set the input parameter schema.
    pub fn input_schema(mut self, schema: serde_json::Value) -> Self {
        self.input_schema = schema;
        self
    }

    /// Require an authenticated caller for invocation.
    pub fn requires_auth(mut self, required: bool) -> Self {
        self.requires_auth = required;
        self
    }

    /// Set the rate limit (max calls per window).
    pub fn rate_limit(mut self, limit: u32) -> Self {
        self.rate_limit = Some(limit);
        self
    }

    /// Set the rolling rate-limit window length.
    pub fn rate_window(mut self, window: Duration) -> Self {
        self.rate_window = window;
        self
    }

    /// Mark the tool active or inactive.
    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

/// Identity and correlation data carried into every tool invocation.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    /// Identifier of this specific call, supplied by the requester.
    pub call_id: String,

    /// Job that requested the call.
    pub job_id: String,

    /// Agent on whose behalf the call runs.
    pub agent_id: String,

    /// Authenticated caller identity, if any.
    pub user_id: Option<String>,

    /// Chat or thread the job belongs to, if any.
    pub chat_id: Option<String>,
}

impl CallContext {
    /// Create a context for calls issued by a job.
    pub fn new(job_id: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            call_id: String::new(),
            job_id: job_id.into(),
            agent_id: agent_id.into(),
            user_id: None,
            chat_id: None,
        }
    }

    /// Set the call identifier.
    pub fn call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = call_id.into();
        self
    }

    /// Set the authenticated caller identity.
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the chat or thread identifier.
    pub fn chat(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    /// Derive a per-call context sharing this context's identity.
    pub fn for_call(&self, call_id: &str) -> Self {
        let mut ctx = self.clone();
        ctx.call_id = call_id.to_string();
        ctx
    }
}
