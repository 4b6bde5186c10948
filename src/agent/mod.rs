// ABOUTME: Agent module - definitions and the registry jobs resolve
// ABOUTME: their target agent from.

mod definition;

pub use definition::{AgentDefinition, AgentRegistry};
