// ABOUTME: Defines the LlmClient trait - the abstraction layer that allows
// ABOUTME: foreman to drive any text-generation backend.

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse};
use crate::error::LlmError;

/// Trait for LLM backend implementations.
///
/// Provider failures of any kind must surface as a single `LlmError`
/// so the job runtime can catch and contain them.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a chat completion request and wait for the full response.
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse, LlmError>;
}
