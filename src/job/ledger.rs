// ABOUTME: Implements the JobLedger - concurrency-safe bookkeeping of
// ABOUTME: in-flight jobs and the substrate for cancellation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::Job;

/// Shared handle to a tracked job.
pub type JobHandle = Arc<Mutex<Job>>;

/// In-memory table of currently in-flight jobs.
///
/// All mutations of the underlying map are mutually exclusive; reads
/// are served from momentary snapshots.
#[derive(Default)]
pub struct JobLedger {
    jobs: Mutex<HashMap<String, JobHandle>>,
}

impl JobLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a job under its id, returning a shared handle to it.
    ///
    /// An existing entry for the same id is overwritten - callers own
    /// id uniqueness per submission.
    pub async fn track(&self, job: Job) -> JobHandle {
        let id = job.id.clone();
        let handle = Arc::new(Mutex::new(job));
        let mut jobs = self.jobs.lock().await;
        jobs.insert(id, Arc::clone(&handle));
        handle
    }

    /// Remove a job from the ledger. No-op when absent.
    pub async fn untrack(&self, job_id: &str) {
        let mut jobs = self.jobs.lock().await;
        jobs.remove(job_id);
    }

    /// Cancel a tracked, currently-running job.
    ///
    /// Atomically checks that an entry exists and is Running; if so,
    /// transitions it to Cancelled, stamps completion, removes it, and
    /// returns true. Absent and already-terminal jobs uniformly return
    /// false. The check-and-transition happens under the map lock so it
    /// cannot interleave with untrack or a completion path.
    pub async fn cancel(&self, job_id: &str) -> bool {
        let mut jobs = self.jobs.lock().await;
        let Some(handle) = jobs.get(job_id).cloned() else {
            return false;
        };

        let mut job = handle.lock().await;
        if !job.cancel() {
            return false;
        }
        debug!(job_id, "job cancelled");
        drop(job);

        jobs.remove(job_id);
        true
    }

    /// Whether a job id is currently tracked.
    pub async fn contains(&self, job_id: &str) -> bool {
        let jobs = self.jobs.lock().await;
        jobs.contains_key(job_id)
    }

    /// Snapshot of currently tracked job ids.
    pub async fn ids(&self) -> Vec<String> {
        let jobs = self.jobs.lock().await;
        jobs.keys().cloned().collect()
    }

    /// Number of currently tracked jobs.
    pub async fn count(&self) -> usize {
        let jobs = self.jobs.lock().await;
        jobs.len()
    }
}
