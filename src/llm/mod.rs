// ABOUTME: LLM module - client abstraction for text-generation backends.
// ABOUTME: Defines types, the client trait, and the Anthropic implementation.

mod anthropic;
mod client;
mod types;

pub use anthropic::*;
pub use client::*;
pub use types::*;
