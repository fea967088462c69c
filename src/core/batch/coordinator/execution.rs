//! Worker pool and per-item dispatch

use super::super::types::*;
use super::state::JobState;
use crate::core::completion::{CompletionService, ServiceError};
use crate::core::prompts::PromptTemplate;
use crate::utils::error::RetryPolicy;
use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Drive a job from `Running` to a terminal state
pub(super) async fn run_job(
    state: Arc<JobState>,
    service: Arc<dyn CompletionService>,
    policy: RetryPolicy,
    concurrency: usize,
) {
    state.mark_running();
    let workers = concurrency.min(state.total()).max(1);
    info!("Processing batch {} with {} workers", state.id, workers);

    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let state = Arc::clone(&state);
            let service = Arc::clone(&service);
            let policy = policy.clone();
            tokio::spawn(worker_loop(worker, state, service, policy))
        })
        .collect();

    let mut worker_panicked = false;
    for joined in join_all(handles).await {
        if let Err(e) = joined {
            error!("Worker for batch {} terminated abnormally: {}", state.id, e);
            worker_panicked = true;
        }
    }

    let status = state.finish(worker_panicked);
    let snapshot = state.snapshot();
    match status {
        JobStatus::Failed => error!(
            "Batch {} failed: {} of {} items failed",
            state.id, snapshot.failed, snapshot.total
        ),
        _ => info!(
            "Batch {} finished as {} in {} ms (succeeded: {}, failed: {}, total: {})",
            state.id,
            status,
            state.elapsed_ms().unwrap_or_default(),
            snapshot.succeeded,
            snapshot.failed,
            snapshot.total
        ),
    }
}

async fn worker_loop(
    worker: usize,
    state: Arc<JobState>,
    service: Arc<dyn CompletionService>,
    policy: RetryPolicy,
) {
    loop {
        if state.is_cancelled() {
            debug!("Worker {} of batch {} stopping on cancel", worker, state.id);
            break;
        }

        let Some((sequence, item)) = state.next_item() else {
            break;
        };

        let result = dispatch_item(&service, &policy, &state.template, sequence, item).await;
        if let Some(e) = result.error() {
            warn!(
                "Item {} of batch {} failed after {} attempt(s): {}",
                result.id(),
                state.id,
                result.attempts(),
                e
            );
        }

        let progress = state.record(result);
        debug!(
            "Completed task {} of {}",
            progress.completed, progress.total
        );
    }
}

/// Complete one item through the retry policy
async fn dispatch_item(
    service: &Arc<dyn CompletionService>,
    policy: &RetryPolicy,
    template: &PromptTemplate,
    sequence: usize,
    item: WorkItem,
) -> WorkResult {
    let system = template.system_message.as_str();
    let user = template.render_user(item.prompt());
    debug!("Dispatching item {} ({})", item.id(), sequence);

    let outcome = policy
        .call_if(
            || {
                AssertUnwindSafe(service.complete(system, &user))
                    .catch_unwind()
                    .map(|completed| {
                        completed.unwrap_or_else(|payload| {
                            Err(ServiceError::panicked(panic_message(payload.as_ref())))
                        })
                    })
            },
            ServiceError::is_retryable,
        )
        .await;

    WorkResult::new(sequence, item, outcome.result, outcome.attempts)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
