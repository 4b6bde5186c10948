// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use foreman::prelude::*;` to get started quickly.

pub use crate::agent::{AgentDefinition, AgentRegistry};
pub use crate::error::{ForemanError, JobError, LlmError, ToolError};
pub use crate::job::{
    ActionItem, ContextMessage, ExecutionContext, Job, JobLedger, JobOutcome, JobStatus, Priority,
    Runtime, extract_action_items,
};
pub use crate::llm::{
    AnthropicClient, ChatMessage, ChatRequest, ChatResponse, LlmClient, Role, StopReason,
    ToolCallRequest, ToolDefinition, Usage,
};
pub use crate::tool::{
    CallContext, RateLimiter, Registry, Tool, ToolCategory, ToolDescriptor, ToolGate, ToolOutcome,
    ToolStatus,
};
pub use crate::tools::{
    CreatedTask, InMemoryStore, MemoryEntry, MemoryReadTool, MemoryStore, MemoryWriteTool,
    TaskCreateTool,
};
