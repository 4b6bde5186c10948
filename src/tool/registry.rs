// ABOUTME: Implements the Registry - a thread-safe catalogue mapping tool
// ABOUTME: ids to descriptors and executable handles.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{Tool, ToolCategory, ToolDescriptor};
use crate::error::ToolError;
use crate::llm::ToolDefinition;

/// A thread-safe registry of tools.
#[derive(Default)]
pub struct Registry {
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails if the descriptor's id is already taken.
    pub async fn register<T: Tool + 'static>(&self, tool: T) -> Result<(), ToolError> {
        self.register_arc(Arc::new(tool)).await
    }

    /// Register a tool from an Arc. Fails if the id is already taken.
    pub async fn register_arc(&self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let id = tool.descriptor().id;
        let mut tools = self.tools.write().await;
        if tools.contains_key(&id) {
            return Err(ToolError::Duplicate(id));
        }
        tools.insert(id, tool);
        Ok(())
    }

    /// Remove a tool by id. Returns whether an entry was removed.
    pub async fn unregister(&self, id: &str) -> bool {
        let mut tools = self.tools.write().await;
        tools.remove(id).is_some()
    }

    /// Get a tool handle by id.
    pub async fn get(&self, id: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.get(id).cloned()
    }

    /// Get a tool's descriptor by id.
    pub async fn describe(&self, id: &str) -> Option<ToolDescriptor> {
        let tools = self.tools.read().await;
        tools.get(id).map(|t| t.descriptor())
    }

    /// List descriptors, optionally filtered by category, sorted by id.
    pub async fn list(
        &self,
        category: Option<ToolCategory>,
        active_only: bool,
    ) -> Vec<ToolDescriptor> {
        let tools = self.tools.read().await;
        let mut descriptors: Vec<_> = tools
            .values()
            .map(|t| t.descriptor())
            .filter(|d| category.is_none_or(|c| d.category == c))
            .filter(|d| !active_only || d.is_active)
            .collect();
        descriptors.sort_by(|a, b| a.id.cmp(&b.id));
        descriptors
    }

    /// Get the number of registered tools.
    pub async fn count(&self) -> usize {
        let tools = self.tools.read().await;
        tools.len()
    }

    /// Resolve ids to LLM tool definitions, silently skipping ids that
    /// do not resolve.
    pub async fn definitions(&self, ids: &[String]) -> Vec<ToolDefinition> {
        let tools = self.tools.read().await;
        ids.iter()
            .filter_map(|id| tools.get(id))
            .map(|t| {
                let d = t.descriptor();
                ToolDefinition {
                    name: d.id,
                    description: d.description,
                    input_schema: d.input_schema,
                }
            })
            .collect()
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            tools: Arc::clone(&self.tools),
        }
    }
}
