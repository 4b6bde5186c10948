// ABOUTME: Tests for the job ledger - tracking, cancellation semantics,
// ABOUTME: and atomicity against completion paths.

use super::*;

fn running_job(id: &str) -> Job {
    let mut job = Job::new("agent-1", "do the thing").with_id(id);
    job.start();
    job
}

#[tokio::test]
async fn test_track_and_untrack() {
    let ledger = JobLedger::new();

    ledger.track(running_job("j1")).await;
    assert!(ledger.contains("j1").await);
    assert_eq!(ledger.count().await, 1);

    ledger.untrack("j1").await;
    assert!(!ledger.contains("j1").await);
    assert_eq!(ledger.count().await, 0);

    // Untracking an absent id is a no-op.
    ledger.untrack("j1").await;
}

#[tokio::test]
async fn test_track_overwrites_same_id() {
    let ledger = JobLedger::new();

    ledger.track(running_job("j1")).await;
    let second = ledger.track(running_job("j1")).await;

    assert_eq!(ledger.count().await, 1);
    // The surviving entry is the later insert.
    assert_eq!(second.lock().await.id, "j1");
}

#[tokio::test]
async fn test_cancel_running_job() {
    let ledger = JobLedger::new();
    let handle = ledger.track(running_job("j1")).await;

    assert!(ledger.cancel("j1").await);

    let job = handle.lock().await;
    assert_eq!(job.status, JobStatus::Cancelled);
    assert!(job.completed_at.is_some());
    drop(job);

    // The entry is removed as part of cancellation.
    assert!(!ledger.contains("j1").await);
}

#[tokio::test]
async fn test_cancel_returns_true_at_most_once() {
    let ledger = JobLedger::new();
    ledger.track(running_job("j1")).await;

    assert!(ledger.cancel("j1").await);
    assert!(!ledger.cancel("j1").await);
}

#[tokio::test]
async fn test_cancel_absent_or_not_running() {
    let ledger = JobLedger::new();
    assert!(!ledger.cancel("ghost").await);

    // A tracked but not-yet-started job cannot be cancelled.
    ledger.track(Job::new("agent-1", "x").with_id("pending")).await;
    assert!(!ledger.cancel("pending").await);
    assert!(ledger.contains("pending").await);
}

#[tokio::test]
async fn test_cancel_after_natural_completion() {
    let ledger = JobLedger::new();
    let handle = ledger.track(running_job("j1")).await;

    // A completion path transitions the job before untracking it.
    handle.lock().await.complete();
    assert!(!ledger.cancel("j1").await);

    // The completed job was not resurrected as cancelled.
    assert_eq!(handle.lock().await.status, JobStatus::Completed);
}

#[tokio::test]
async fn test_ids_snapshot() {
    let ledger = JobLedger::new();
    ledger.track(running_job("a")).await;
    ledger.track(running_job("b")).await;

    let mut ids = ledger.ids().await;
    ids.sort();
    assert_eq!(ids, vec!["a", "b"]);
}
