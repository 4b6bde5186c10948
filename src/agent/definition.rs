// ABOUTME: Agent definition types - identity, system prompt, and generation
// ABOUTME: parameters. AgentRegistry holds the definitions jobs can target.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Definition of an agent that jobs can be submitted against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Unique identifier for this agent.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    pub description: Option<String>,

    /// System prompt placed first in every prompt built for this agent.
    pub system_prompt: String,

    /// Model override. If None, the runtime default is used.
    pub model: Option<String>,

    /// Sampling temperature.
    pub temperature: f64,

    /// Maximum output tokens per backend call.
    pub max_tokens: u32,

    pub is_active: bool,
}

impl AgentDefinition {
    /// Create an agent definition with required fields.
    pub fn new(id: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: None,
            system_prompt: system_prompt.into(),
            model: None,
            temperature: 0.7,
            max_tokens: 2000,
            is_active: true,
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the model override.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max output tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Registry of agent definitions, keyed by agent id.
#[derive(Default)]
pub struct AgentRegistry {
    agents: Arc<RwLock<HashMap<String, AgentDefinition>>>,
}

impl AgentRegistry {
    /// Create a new empty agent registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent definition, replacing any previous one.
    pub async fn register(&self, definition: AgentDefinition) {
        let mut agents = self.agents.write().await;
        agents.insert(definition.id.clone(), definition);
    }

    /// Get an agent definition by id.
    pub async fn get(&self, agent_id: &str) -> Option<AgentDefinition> {
        let agents = self.agents.read().await;
        agents.get(agent_id).cloned()
    }

    /// List all registered agent ids, sorted.
    pub async fn list(&self) -> Vec<String> {
        let agents = self.agents.read().await;
        let mut ids: Vec<_> = agents.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Clone for AgentRegistry {
    fn clone(&self) -> Self {
        Self {
            agents: Arc::clone(&self.agents),
        }
    }
}
