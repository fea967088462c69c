//! Core BatchCoordinator struct and public API methods

use super::super::types::*;
use super::execution::run_job;
use super::state::JobState;
use super::validation::validate_job;
use crate::config::BatchConfig;
use crate::core::completion::CompletionService;
use crate::utils::error::{LabError, Result, RetryPolicy};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs batch jobs against a completion service with a bounded worker pool
pub struct BatchCoordinator {
    /// Completion backend shared by every worker
    pub(super) service: Arc<dyn CompletionService>,
    /// Dispatch settings
    pub(super) config: BatchConfig,
    /// Per-item retry policy
    pub(super) retry_policy: RetryPolicy,
    /// Submitted jobs not yet discarded
    pub(super) jobs: Arc<DashMap<JobId, Arc<JobState>>>,
}

impl Clone for BatchCoordinator {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: self.config.clone(),
            retry_policy: self.retry_policy.clone(),
            jobs: Arc::clone(&self.jobs),
        }
    }
}

impl BatchCoordinator {
    /// Create a new coordinator
    pub fn new(service: Arc<dyn CompletionService>, config: BatchConfig) -> Self {
        let retry_policy = RetryPolicy::new(config.retry.clone());
        Self {
            service,
            config,
            retry_policy,
            jobs: Arc::new(DashMap::new()),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Validate and start a job, returning as soon as it is scheduled.
    ///
    /// Must be called from within a Tokio runtime. An invalid job is rejected
    /// before anything is registered.
    pub fn submit(&self, job: BatchJob) -> Result<JobHandle> {
        validate_job(&job)?;

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            LabError::internal(format!("Batch submission requires a Tokio runtime: {}", e))
        })?;

        let (id, items, template, created_at) = job.into_parts();
        let state = Arc::new(JobState::new(id, template, items, created_at));
        self.jobs.insert(id, Arc::clone(&state));

        info!(
            "Submitted batch {} with {} items (concurrency: {}, service: {})",
            id,
            state.total(),
            self.config.concurrency.max(1),
            self.service.name()
        );

        let service = Arc::clone(&self.service);
        let policy = self.retry_policy.clone();
        let concurrency = self.config.concurrency.max(1);
        runtime.spawn(run_job(state, service, policy, concurrency));

        Ok(JobHandle::new(id))
    }

    /// Current progress of a job
    pub fn poll(&self, handle: &JobHandle) -> Result<ProgressSnapshot> {
        Ok(self.lookup(handle)?.snapshot())
    }

    /// Ask the workers to stop taking new items.
    ///
    /// Items already being dispatched still finish and are recorded.
    /// Cancelling a finished job does nothing.
    pub fn cancel(&self, handle: &JobHandle) -> Result<()> {
        let state = self.lookup(handle)?;
        if state.request_cancel() {
            info!("Cancellation requested for batch {}", handle);
        } else {
            debug!("Batch {} already finished, ignoring cancel", handle);
        }
        Ok(())
    }

    /// Results of a finished job, in completion order
    pub fn results(&self, handle: &JobHandle) -> Result<Vec<WorkResult>> {
        let state = self.lookup(handle)?;
        let status = state.status();
        if !status.is_terminal() {
            return Err(LabError::job_not_complete(
                handle.to_string(),
                status.to_string(),
            ));
        }
        Ok(state.results())
    }

    /// Wait until the job reaches a terminal state
    pub async fn wait(&self, handle: &JobHandle) -> Result<ProgressSnapshot> {
        let state = self.lookup(handle)?;
        let mut rx = state.subscribe();
        rx.wait_for(|status| status.is_terminal())
            .await
            .map_err(|_| LabError::internal(format!("Batch {} stopped reporting", handle)))?;
        Ok(state.snapshot())
    }

    /// Take the results of a finished job and forget it
    ///
    /// Only one caller can discard a given job; later calls see `JobNotFound`.
    pub fn discard(&self, handle: &JobHandle) -> Result<Vec<WorkResult>> {
        match self
            .jobs
            .remove_if(&handle.id(), |_, state| state.status().is_terminal())
        {
            Some((_, state)) => {
                debug!("Discarded batch {}", handle);
                Ok(state.take_results())
            }
            None => {
                let status = self.lookup(handle)?.status();
                Err(LabError::job_not_complete(
                    handle.to_string(),
                    status.to_string(),
                ))
            }
        }
    }

    /// Progress of every registered job
    pub fn list(&self) -> Vec<ProgressSnapshot> {
        let mut snapshots: Vec<_> = self
            .jobs
            .iter()
            .map(|entry| (entry.value().created_at, entry.value().snapshot()))
            .collect();
        snapshots.sort_by_key(|(created_at, _)| *created_at);
        snapshots.into_iter().map(|(_, snapshot)| snapshot).collect()
    }

    /// Number of jobs that have not reached a terminal state
    pub fn active_jobs(&self) -> usize {
        self.jobs
            .iter()
            .filter(|entry| !entry.value().status().is_terminal())
            .count()
    }

    fn lookup(&self, handle: &JobHandle) -> Result<Arc<JobState>> {
        match self.jobs.get(&handle.id()) {
            Some(entry) => Ok(Arc::clone(entry.value())),
            None => {
                warn!("Unknown batch handle {}", handle);
                Err(LabError::job_not_found(handle.to_string()))
            }
        }
    }
}
