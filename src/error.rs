// ABOUTME: Defines all error types for the foreman library using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under ForemanError.

/// Top-level error type for the foreman library.
#[derive(Debug, thiserror::Error)]
pub enum ForemanError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Job error: {0}")]
    Job(#[from] JobError),
}

/// Errors from LLM backend operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Backend call timed out after {0}s")]
    Timeout(u64),
}

/// Errors from tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool already registered: {0}")]
    Duplicate(String),

    #[error("Tool '{0}' requires an authenticated caller")]
    Unauthorized(String),

    #[error("Rate limit exceeded for tool '{0}'")]
    RateLimited(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}

/// Errors from job lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
