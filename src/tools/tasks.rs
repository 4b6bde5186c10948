// ABOUTME: TaskCreateTool - lets agents create follow-up tasks.
// ABOUTME: Created tasks accumulate in a shared list the caller drains.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::job::Priority;
use crate::tool::{CallContext, Tool, ToolCategory, ToolDescriptor};

/// A task created by an agent during a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTask {
    pub id: String,
    pub title: String,
    pub assignee: Option<String>,
    pub priority: Priority,
    /// Job that created the task.
    pub job_id: String,
    pub created_at: DateTime<Utc>,
}

/// Tool for creating follow-up tasks.
///
/// Carries a rate limit so a runaway agent cannot flood the task list.
pub struct TaskCreateTool {
    created: Arc<Mutex<Vec<CreatedTask>>>,
}

impl TaskCreateTool {
    pub fn new() -> Self {
        Self {
            created: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Remove and return all tasks created so far.
    pub async fn drain(&self) -> Vec<CreatedTask> {
        let mut created = self.created.lock().await;
        std::mem::take(&mut *created)
    }
}

impl Default for TaskCreateTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for TaskCreateTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "task_create",
            "task_create",
            ToolCategory::Scheduling,
            "Create a follow-up task with a title, optional assignee, and priority",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Short description of the task"
                },
                "assignee": {
                    "type": "string",
                    "description": "Who the task is for"
                },
                "priority": {
                    "type": "string",
                    "enum": ["low", "medium", "high", "urgent"],
                    "default": "medium"
                }
            },
            "required": ["title"]
        }))
        .rate_limit(30)
    }

    fn validate(&self, params: &serde_json::Value) -> bool {
        params
            .get("title")
            .and_then(|v| v.as_str())
            .is_some_and(|t| !t.is_empty())
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &CallContext,
    ) -> Result<serde_json::Value, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            title: String,
            assignee: Option<String>,
            #[serde(default)]
            priority: Priority,
        }

        let params: Params = serde_json::from_value(params)?;
        let task = CreatedTask {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            assignee: params.assignee,
            priority: params.priority,
            job_id: ctx.job_id.clone(),
            created_at: Utc::now(),
        };
        let id = task.id.clone();

        let mut created = self.created.lock().await;
        created.push(task);

        Ok(serde_json::json!({"id": id}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_drain() {
        let tool = TaskCreateTool::new();
        let ctx = CallContext::new("job-7", "agent-1");

        tool.execute(
            serde_json::json!({"title": "Review the proposal", "assignee": "bob", "priority": "high"}),
            &ctx,
        )
        .await
        .unwrap();
        tool.execute(serde_json::json!({"title": "Send minutes"}), &ctx)
            .await
            .unwrap();

        let tasks = tool.drain().await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Review the proposal");
        assert_eq!(tasks[0].assignee.as_deref(), Some("bob"));
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert_eq!(tasks[1].job_id, "job-7");

        // Draining empties the list.
        assert!(tool.drain().await.is_empty());
    }

    #[test]
    fn test_validation_requires_title() {
        let tool = TaskCreateTool::new();
        assert!(tool.validate(&serde_json::json!({"title": "x"})));
        assert!(!tool.validate(&serde_json::json!({"title": ""})));
        assert!(!tool.validate(&serde_json::json!({})));
    }

    #[test]
    fn test_descriptor_carries_rate_limit() {
        let descriptor = TaskCreateTool::new().descriptor();
        assert_eq!(descriptor.rate_limit, Some(30));
    }
}
