// ABOUTME: Defines the Tool trait - the core abstraction for agent
// ABOUTME: capabilities, with a descriptor, validation, and async execution.

use async_trait::async_trait;

use super::{CallContext, ToolDescriptor};

/// A tool that can be invoked on behalf of an agent.
///
/// The gate never inspects how a tool does its work; it only consults
/// the descriptor, validates, and dispatches.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns this tool's static descriptor.
    fn descriptor(&self) -> ToolDescriptor;

    /// Structural check of the parameter payload against the declared
    /// schema. Must not trigger any side effects.
    fn validate(&self, params: &serde_json::Value) -> bool;

    /// Execute the tool with the given parameters and call context.
    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &CallContext,
    ) -> Result<serde_json::Value, anyhow::Error>;
}
