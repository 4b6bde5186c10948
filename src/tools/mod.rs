// ABOUTME: Built-in tool implementations.
// ABOUTME: Memory read/write over a store trait, and task creation.

mod memory;
mod tasks;

pub use memory::{InMemoryStore, MemoryEntry, MemoryReadTool, MemoryStore, MemoryWriteTool};
pub use tasks::{CreatedTask, TaskCreateTool};
