// ABOUTME: Integration tests verifying modules work together.
// ABOUTME: Full submit/cancel/gate workflows without external dependencies.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use foreman::prelude::*;

/// Backend stub returning canned text and tool calls.
struct StubBackend {
    content: String,
    tool_calls: Vec<ToolCallRequest>,
}

impl StubBackend {
    fn text(content: &str) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }
}

#[async_trait]
impl LlmClient for StubBackend {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse, LlmError> {
        Ok(ChatResponse {
            id: "msg_stub".into(),
            model: req.model.clone(),
            content: self.content.clone(),
            tool_calls: self.tool_calls.clone(),
            stop_reason: if self.tool_calls.is_empty() {
                StopReason::EndTurn
            } else {
                StopReason::ToolUse
            },
            usage: Usage {
                input_tokens: 42,
                output_tokens: 17,
            },
        })
    }
}

async fn seeded_memory_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store
        .append(MemoryEntry {
            id: "m1".into(),
            scope: "global".into(),
            content: "The deploy window is Thursday afternoon".into(),
            author_id: Some("alice".into()),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn test_submit_plain_text_job() {
    let agents = AgentRegistry::new();
    agents
        .register(AgentDefinition::new("status", "Report system status."))
        .await;

    let runtime = Runtime::new(Arc::new(StubBackend::text("All good")), agents, Registry::new());

    let outcome = runtime.submit(Job::new("status", "how are we doing?")).await;

    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(outcome.response, "All good");
    assert!(outcome.action_items.is_empty());
    assert_eq!(outcome.usage.input_tokens, 42);
    assert_eq!(runtime.ledger().count().await, 0);
}

#[tokio::test]
async fn test_full_workflow_with_memory_tool() {
    let store = seeded_memory_store().await;

    let tools = Registry::new();
    tools
        .register(MemoryReadTool::new(store.clone() as Arc<dyn MemoryStore>))
        .await
        .unwrap();
    tools
        .register(MemoryWriteTool::new(store as Arc<dyn MemoryStore>))
        .await
        .unwrap();

    let agents = AgentRegistry::new();
    agents
        .register(AgentDefinition::new(
            "assistant",
            "Answer using the memory store.",
        ))
        .await;

    let backend = StubBackend {
        content: "Checked memory.\n- [ ] confirm the deploy window with Alice".into(),
        tool_calls: vec![ToolCallRequest {
            id: "call-1".into(),
            name: "memory_read".into(),
            arguments: serde_json::json!({"query": "deploy window"}),
        }],
    };

    let runtime = Runtime::new(Arc::new(backend), agents, tools);

    let job = Job::new("assistant", "when do we deploy?")
        .tools_allowed(vec!["memory_read".into()])
        .context(ExecutionContext::new("chat-1"));
    let outcome = runtime.submit(job).await;

    assert_eq!(outcome.status, JobStatus::Completed);

    // The requested memory read went through the gate and succeeded.
    assert_eq!(outcome.tool_outcomes.len(), 1);
    let read = &outcome.tool_outcomes[0];
    assert_eq!(read.call_id, "call-1");
    assert_eq!(read.status, ToolStatus::Completed);
    assert_eq!(read.output.as_ref().unwrap()["count"], 1);

    // The follow-up item came out of the response text.
    assert_eq!(outcome.action_items.len(), 1);
    assert_eq!(
        outcome.action_items[0].description,
        "confirm the deploy window with Alice"
    );
}

#[tokio::test]
async fn test_memory_write_requires_auth_through_gate() {
    let store = seeded_memory_store().await;

    let registry = Registry::new();
    registry
        .register(MemoryWriteTool::new(store.clone() as Arc<dyn MemoryStore>))
        .await
        .unwrap();
    registry
        .register(MemoryReadTool::new(store as Arc<dyn MemoryStore>))
        .await
        .unwrap();
    let gate = ToolGate::new(registry);

    let params = serde_json::json!({"content": "Retro moved to Friday"});
    let anonymous = CallContext::new("job-1", "agent-1").call_id("c1");

    let denied = gate
        .execute("memory_write", params.clone(), &anonymous)
        .await;
    assert_eq!(denied.status, ToolStatus::Unauthorized);

    let authed = anonymous.clone().user("bob");
    let written = gate.execute("memory_write", params, &authed).await;
    assert_eq!(written.status, ToolStatus::Completed);

    // The write is visible to a subsequent read.
    let read = gate
        .execute(
            "memory_read",
            serde_json::json!({"query": "retro"}),
            &authed,
        )
        .await;
    assert_eq!(read.status, ToolStatus::Completed);
    assert_eq!(read.output.as_ref().unwrap()["count"], 1);
}

#[tokio::test]
async fn test_unregistered_tool_never_faults() {
    let registry = Registry::new();
    registry.register(TaskCreateTool::new()).await.unwrap();
    let gate = ToolGate::new(registry.clone());

    assert!(registry.unregister("task_create").await);

    let outcome = gate
        .execute(
            "task_create",
            serde_json::json!({"title": "orphaned"}),
            &CallContext::new("job-1", "agent-1"),
        )
        .await;

    assert_eq!(outcome.status, ToolStatus::Failed);
    assert!(outcome.error.as_deref().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_task_creation_during_job() {
    let task_tool = Arc::new(TaskCreateTool::new());

    let tools = Registry::new();
    tools
        .register_arc(Arc::clone(&task_tool) as Arc<dyn Tool>)
        .await
        .unwrap();

    let agents = AgentRegistry::new();
    agents
        .register(AgentDefinition::new("planner", "Plan follow-ups."))
        .await;

    let backend = StubBackend {
        content: "Planned.".into(),
        tool_calls: vec![ToolCallRequest {
            id: "call-9".into(),
            name: "task_create".into(),
            arguments: serde_json::json!({"title": "Draft the rollout plan", "priority": "high"}),
        }],
    };

    let runtime = Runtime::new(Arc::new(backend), agents, tools);

    let job = Job::new("planner", "plan the rollout")
        .with_id("job-9")
        .tools_allowed(vec!["task_create".into()]);
    let outcome = runtime.submit(job).await;

    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(outcome.tool_outcomes.len(), 1);
    assert_eq!(outcome.tool_outcomes[0].status, ToolStatus::Completed);

    // The side effect landed in the shared task list.
    let tasks = task_tool.drain().await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Draft the rollout plan");
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(tasks[0].job_id, "job-9");
}

#[tokio::test]
async fn test_descriptor_listing_for_catalogue() {
    let store: Arc<dyn MemoryStore> = Arc::new(InMemoryStore::new());

    let registry = Registry::new();
    registry
        .register(MemoryReadTool::new(Arc::clone(&store)))
        .await
        .unwrap();
    registry
        .register(MemoryWriteTool::new(store))
        .await
        .unwrap();
    registry.register(TaskCreateTool::new()).await.unwrap();

    let memory = registry.list(Some(ToolCategory::Memory), true).await;
    let ids: Vec<_> = memory.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["memory_read", "memory_write"]);

    let defs = registry
        .definitions(&["task_create".to_string(), "ghost".to_string()])
        .await;
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, "task_create");
}
