// ABOUTME: The Runtime - owns the end-to-end lifecycle of a job from
// ABOUTME: submission through backend call and tool fan-out to outcome.

use std::sync::Arc;

use tracing::{debug, warn};

use super::extract::extract_action_items;
use super::ledger::{JobHandle, JobLedger};
use super::{ActionItem, Job, JobOutcome};
use crate::agent::{AgentDefinition, AgentRegistry};
use crate::error::{ForemanError, JobError, LlmError};
use crate::llm::{ChatMessage, ChatRequest, LlmClient, Usage};
use crate::tool::{CallContext, Registry, ToolGate, ToolOutcome};

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Output of a successful execution pass, before the terminal transition.
struct RunOutput {
    response: String,
    action_items: Vec<ActionItem>,
    tool_outcomes: Vec<ToolOutcome>,
    usage: Usage,
}

/// The job execution runtime.
///
/// Drives each submitted job through the status state machine, calls
/// the text-generation backend, routes requested tool calls through
/// the gate, and always produces a [`JobOutcome`] - errors from any
/// step are contained, never raised to the caller.
pub struct Runtime {
    client: Arc<dyn LlmClient>,
    agents: AgentRegistry,
    tools: Registry,
    gate: ToolGate,
    ledger: JobLedger,
    default_model: String,
}

impl Runtime {
    /// Create a runtime over the given backend client and registries.
    pub fn new(client: Arc<dyn LlmClient>, agents: AgentRegistry, tools: Registry) -> Self {
        Self {
            gate: ToolGate::new(tools.clone()),
            client,
            agents,
            tools,
            ledger: JobLedger::new(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the model used when an agent has no model override.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// The agent registry jobs are resolved against.
    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    /// The tool registry behind the gate.
    pub fn tools(&self) -> &Registry {
        &self.tools
    }

    /// The invocation gate for direct tool calls.
    pub fn gate(&self) -> &ToolGate {
        &self.gate
    }

    /// The ledger of in-flight jobs.
    pub fn ledger(&self) -> &JobLedger {
        &self.ledger
    }

    /// Execute a job to its terminal outcome.
    pub async fn submit(&self, job: Job) -> JobOutcome {
        let Some(agent) = self.agents.get(&job.agent_id).await else {
            warn!(job_id = %job.id, agent_id = %job.agent_id, "job targets unknown agent");
            let error = JobError::AgentNotFound(job.agent_id.clone());
            return JobOutcome::failed(&job, error.to_string());
        };

        let job_id = job.id.clone();
        let handle = self.ledger.track(job).await;
        {
            let mut job = handle.lock().await;
            job.start();
            debug!(job_id = %job.id, agent_id = %job.agent_id, "job running");
        }

        let result = self.run(&agent, &handle).await;

        let outcome = {
            let mut job = handle.lock().await;
            match result {
                Ok(output) => {
                    if job.complete() {
                        JobOutcome::completed(
                            &job,
                            output.response,
                            output.action_items,
                            output.tool_outcomes,
                            output.usage,
                        )
                    } else {
                        // Cancelled while the work was in flight; the
                        // backend result is discarded.
                        JobOutcome::cancelled(&job)
                    }
                }
                Err(e) => {
                    if job.fail() {
                        warn!(job_id = %job.id, error = %e, "job failed");
                        JobOutcome::failed(&job, e.to_string())
                    } else {
                        JobOutcome::cancelled(&job)
                    }
                }
            }
        };

        self.ledger.untrack(&job_id).await;
        outcome
    }

    /// Cancel a running job. Delegates to the ledger.
    pub async fn cancel(&self, job_id: &str) -> bool {
        self.ledger.cancel(job_id).await
    }

    async fn run(
        &self,
        agent: &AgentDefinition,
        handle: &JobHandle,
    ) -> Result<RunOutput, ForemanError> {
        let (job_id, agent_id, instruction, context, tools_allowed, timeout) = {
            let job = handle.lock().await;
            (
                job.id.clone(),
                job.agent_id.clone(),
                job.instruction.clone(),
                job.context.clone(),
                job.tools_allowed.clone(),
                job.timeout,
            )
        };

        // Prompt order is fixed: system, rendered context, instruction.
        let mut messages = vec![ChatMessage::system(&agent.system_prompt)];
        if !context.recent_messages.is_empty() {
            let rendered: Vec<String> = context
                .recent_messages
                .iter()
                .map(|m| format!("{}: {}", m.role, m.content))
                .collect();
            messages.push(ChatMessage::user(format!(
                "Recent conversation:\n{}",
                rendered.join("\n")
            )));
        }
        messages.push(ChatMessage::user(&instruction));

        let definitions = self.tools.definitions(&tools_allowed).await;
        let model = agent
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());
        let request = ChatRequest::new(model)
            .messages(messages)
            .tools(definitions)
            .temperature(agent.temperature)
            .max_tokens(agent.max_tokens);

        let response = tokio::time::timeout(timeout, self.client.chat(&request))
            .await
            .map_err(|_| LlmError::Timeout(timeout.as_secs()))??;

        let tool_outcomes = if response.has_tool_calls() {
            let mut ctx = CallContext::new(&job_id, &agent_id);
            if !context.chat_id.is_empty() {
                ctx = ctx.chat(&context.chat_id);
            }
            self.gate.execute_batch(&response.tool_calls, &ctx).await
        } else {
            Vec::new()
        };

        let action_items = extract_action_items(&response.content);

        Ok(RunOutput {
            response: response.content,
            action_items,
            tool_outcomes,
            usage: response.usage,
        })
    }
}
