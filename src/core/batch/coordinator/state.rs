//! Shared state of one running job

use super::super::types::*;
use crate::core::prompts::PromptTemplate;
use chrono::{DateTime, Utc};
use crossbeam_queue::SegQueue;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Counters and results, only mutated by workers
#[derive(Debug)]
struct JobRecord {
    status: JobStatus,
    succeeded: usize,
    failed: usize,
    unreachable: usize,
    results: Vec<WorkResult>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

pub(super) struct JobState {
    pub(super) id: JobId,
    pub(super) template: PromptTemplate,
    pub(super) created_at: DateTime<Utc>,
    total: usize,
    queue: SegQueue<(usize, WorkItem)>,
    record: Mutex<JobRecord>,
    cancel_requested: AtomicBool,
    status_tx: watch::Sender<JobStatus>,
}

impl JobState {
    pub(super) fn new(
        id: JobId,
        template: PromptTemplate,
        items: Vec<WorkItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total = items.len();
        let queue = SegQueue::new();
        for entry in items.into_iter().enumerate() {
            queue.push(entry);
        }
        let (status_tx, _) = watch::channel(JobStatus::Pending);

        Self {
            id,
            template,
            created_at,
            total,
            queue,
            record: Mutex::new(JobRecord {
                status: JobStatus::Pending,
                succeeded: 0,
                failed: 0,
                unreachable: 0,
                results: Vec::with_capacity(total),
                started_at: None,
                finished_at: None,
            }),
            cancel_requested: AtomicBool::new(false),
            status_tx,
        }
    }

    pub(super) fn total(&self) -> usize {
        self.total
    }

    pub(super) fn snapshot(&self) -> ProgressSnapshot {
        let record = self.record.lock();
        ProgressSnapshot {
            job_id: self.id,
            status: record.status,
            total: self.total,
            completed: record.results.len(),
            succeeded: record.succeeded,
            failed: record.failed,
        }
    }

    pub(super) fn status(&self) -> JobStatus {
        self.record.lock().status
    }

    pub(super) fn subscribe(&self) -> watch::Receiver<JobStatus> {
        self.status_tx.subscribe()
    }

    pub(super) fn is_cancelled(&self) -> bool {
        self.cancel_requested.load(Ordering::Acquire)
    }

    /// Returns false when the job had already finished
    pub(super) fn request_cancel(&self) -> bool {
        if self.status().is_terminal() {
            return false;
        }
        self.cancel_requested.store(true, Ordering::Release);
        true
    }

    pub(super) fn next_item(&self) -> Option<(usize, WorkItem)> {
        self.queue.pop()
    }

    pub(super) fn mark_running(&self) {
        {
            let mut record = self.record.lock();
            record.status = JobStatus::Running;
            record.started_at = Some(Utc::now());
        }
        self.status_tx.send_replace(JobStatus::Running);
    }

    /// Append one result and return the progress after it
    pub(super) fn record(&self, result: WorkResult) -> ProgressSnapshot {
        let mut record = self.record.lock();
        match result.error() {
            None => record.succeeded += 1,
            Some(error) => {
                record.failed += 1;
                if error.is_unreachable() {
                    record.unreachable += 1;
                }
            }
        }
        record.results.push(result);

        ProgressSnapshot {
            job_id: self.id,
            status: record.status,
            total: self.total,
            completed: record.results.len(),
            succeeded: record.succeeded,
            failed: record.failed,
        }
    }

    /// Settle the terminal status once every worker has stopped
    pub(super) fn finish(&self, worker_panicked: bool) -> JobStatus {
        let status = {
            let mut record = self.record.lock();
            let undispatched = !self.queue.is_empty();

            record.status = if worker_panicked {
                JobStatus::Failed
            } else if self.is_cancelled() && undispatched {
                JobStatus::Cancelled
            } else if record.succeeded == 0 && record.unreachable == self.total {
                JobStatus::Failed
            } else {
                JobStatus::Completed
            };
            record.finished_at = Some(Utc::now());
            record.status
        };

        self.status_tx.send_replace(status);
        status
    }

    pub(super) fn results(&self) -> Vec<WorkResult> {
        self.record.lock().results.clone()
    }

    pub(super) fn take_results(&self) -> Vec<WorkResult> {
        std::mem::take(&mut self.record.lock().results)
    }

    pub(super) fn elapsed_ms(&self) -> Option<i64> {
        let record = self.record.lock();
        match (record.started_at, record.finished_at) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds()),
            _ => None,
        }
    }
}
