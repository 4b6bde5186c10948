// ABOUTME: Implements the ToolGate - the sole dispatch path for tool calls.
// ABOUTME: Enforces existence, auth, rate limit, and validation before execution.

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, warn};

use super::{CallContext, RateLimiter, Registry, ToolOutcome};
use crate::llm::ToolCallRequest;

/// The gate every tool call passes through before reaching its handle.
///
/// Checks run in a fixed order - existence, authorization, rate limit,
/// parameter validation, dispatch - short-circuiting on the first
/// failure. Whatever happens, each attempt yields a [`ToolOutcome`];
/// no error escapes to the caller.
pub struct ToolGate {
    registry: Registry,
    limiter: RateLimiter,
}

impl ToolGate {
    /// Create a gate over the given registry, with a fresh rate window.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            limiter: RateLimiter::new(),
        }
    }

    /// The registry this gate dispatches against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Execute a single tool call, yielding an outcome on every path.
    pub async fn execute(
        &self,
        tool_id: &str,
        params: serde_json::Value,
        ctx: &CallContext,
    ) -> ToolOutcome {
        let started_at = Utc::now();

        let Some(tool) = self.registry.get(tool_id).await else {
            return ToolOutcome::failed(
                tool_id,
                &ctx.call_id,
                format!("tool not found: {tool_id}"),
                started_at,
            );
        };

        let descriptor = tool.descriptor();

        if descriptor.requires_auth && ctx.user_id.is_none() {
            warn!(tool_id, job_id = %ctx.job_id, "unauthenticated call to auth-required tool");
            return ToolOutcome::unauthorized(
                tool_id,
                &ctx.call_id,
                format!("tool '{tool_id}' requires an authenticated caller"),
                started_at,
            );
        }

        if !self
            .limiter
            .allow(tool_id, descriptor.rate_limit, descriptor.rate_window)
            .await
        {
            return ToolOutcome::failed(tool_id, &ctx.call_id, "rate limit exceeded", started_at);
        }

        if !tool.validate(&params) {
            return ToolOutcome::failed(tool_id, &ctx.call_id, "invalid parameters", started_at);
        }

        debug!(tool_id, call_id = %ctx.call_id, "dispatching tool call");
        match tool.execute(params, ctx).await {
            Ok(output) => ToolOutcome::completed(tool_id, &ctx.call_id, output, started_at),
            Err(e) => {
                warn!(tool_id, call_id = %ctx.call_id, error = %e, "tool execution failed");
                ToolOutcome::failed(tool_id, &ctx.call_id, e.to_string(), started_at)
            }
        }
    }

    /// Execute a batch of requested calls concurrently.
    ///
    /// Outcomes are returned in input order. Each attempt is fully
    /// independent: a failure or rate-limit denial in one does not
    /// affect its siblings.
    pub async fn execute_batch(
        &self,
        calls: &[ToolCallRequest],
        ctx: &CallContext,
    ) -> Vec<ToolOutcome> {
        let attempts = calls.iter().map(|call| {
            let call_ctx = ctx.for_call(&call.id);
            async move {
                self.execute(&call.name, call.arguments.clone(), &call_ctx)
                    .await
            }
        });
        join_all(attempts).await
    }
}
