// ABOUTME: Memory tools - read from and write to a shared memory store.
// ABOUTME: MemoryWriteTool requires an authenticated caller.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::tool::{CallContext, Tool, ToolCategory, ToolDescriptor};

/// One remembered fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: String,
    pub scope: String,
    pub content: String,
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Storage backend for memory tools.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Append an entry to the store.
    async fn append(&self, entry: MemoryEntry) -> Result<(), anyhow::Error>;

    /// Search entries by substring, newest first.
    async fn search(
        &self,
        query: &str,
        scope: Option<&str>,
        limit: usize,
    ) -> Result<Vec<MemoryEntry>, anyhow::Error>;
}

/// In-memory store, suitable for tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<Vec<MemoryEntry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn append(&self, entry: MemoryEntry) -> Result<(), anyhow::Error> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        scope: Option<&str>,
        limit: usize,
    ) -> Result<Vec<MemoryEntry>, anyhow::Error> {
        let entries = self.entries.read().await;
        let query = query.to_lowercase();
        let mut hits: Vec<_> = entries
            .iter()
            .filter(|e| scope.is_none_or(|s| e.scope == s))
            .filter(|e| e.content.to_lowercase().contains(&query))
            .cloned()
            .collect();
        hits.reverse();
        hits.truncate(limit);
        Ok(hits)
    }
}

/// Tool for retrieving relevant memories.
pub struct MemoryReadTool {
    store: Arc<dyn MemoryStore>,
}

impl MemoryReadTool {
    pub fn new(store: Arc<dyn MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for MemoryReadTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "memory_read",
            "memory_read",
            ToolCategory::Memory,
            "Retrieve relevant entries from the shared memory store",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query for memory retrieval"
                },
                "scope": {
                    "type": "string",
                    "description": "Restrict the search to one scope"
                },
                "limit": {
                    "type": "integer",
                    "default": 10,
                    "minimum": 1,
                    "maximum": 50,
                    "description": "Maximum number of entries to return"
                }
            },
            "required": ["query"]
        }))
    }

    fn validate(&self, params: &serde_json::Value) -> bool {
        params
            .get("query")
            .and_then(|v| v.as_str())
            .is_some_and(|q| !q.is_empty())
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<serde_json::Value, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            query: String,
            scope: Option<String>,
            #[serde(default = "default_limit")]
            limit: usize,
        }
        fn default_limit() -> usize {
            10
        }

        let params: Params = serde_json::from_value(params)?;
        let entries = self
            .store
            .search(&params.query, params.scope.as_deref(), params.limit)
            .await?;

        Ok(serde_json::json!({
            "count": entries.len(),
            "entries": entries,
        }))
    }
}

/// Tool for writing a new memory entry. Requires an authenticated caller.
pub struct MemoryWriteTool {
    store: Arc<dyn MemoryStore>,
}

impl MemoryWriteTool {
    pub fn new(store: Arc<dyn MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for MemoryWriteTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "memory_write",
            "memory_write",
            ToolCategory::Memory,
            "Save a new entry to the shared memory store",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The fact to remember"
                },
                "scope": {
                    "type": "string",
                    "default": "global",
                    "description": "Scope the entry belongs to"
                }
            },
            "required": ["content"]
        }))
        .requires_auth(true)
    }

    fn validate(&self, params: &serde_json::Value) -> bool {
        params
            .get("content")
            .and_then(|v| v.as_str())
            .is_some_and(|c| !c.is_empty())
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &CallContext,
    ) -> Result<serde_json::Value, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            content: String,
            #[serde(default = "default_scope")]
            scope: String,
        }
        fn default_scope() -> String {
            "global".to_string()
        }

        let params: Params = serde_json::from_value(params)?;
        let entry = MemoryEntry {
            id: Uuid::new_v4().to_string(),
            scope: params.scope,
            content: params.content,
            author_id: ctx.user_id.clone(),
            created_at: Utc::now(),
        };
        let id = entry.id.clone();
        self.store.append(entry).await?;

        Ok(serde_json::json!({"id": id}))
    }
}
