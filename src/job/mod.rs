// ABOUTME: Job module - the job model, in-flight ledger, action-item
// ABOUTME: extraction, and the execution runtime.

mod extract;
mod ledger;
mod runtime;
mod types;

pub use extract::extract_action_items;
pub use ledger::{JobHandle, JobLedger};
pub use runtime::Runtime;
pub use types::*;

#[cfg(test)]
mod ledger_test;
