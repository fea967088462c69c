//! Batch submission validation

use super::super::types::*;
use crate::utils::error::{LabError, Result};

/// Upper bound on items per job
pub(super) const MAX_BATCH_ITEMS: usize = 50_000;

/// Validate a job before it is registered
pub(super) fn validate_job(job: &BatchJob) -> Result<()> {
    if job.is_empty() {
        return Err(LabError::invalid_job(
            "Batch must contain at least one work item",
        ));
    }

    if job.len() > MAX_BATCH_ITEMS {
        return Err(LabError::invalid_job(format!(
            "Batch size {} exceeds maximum limit of {} items",
            job.len(),
            MAX_BATCH_ITEMS
        )));
    }

    for (index, item) in job.items().iter().enumerate() {
        if item.id().trim().is_empty() {
            return Err(LabError::invalid_job(format!(
                "Work item {} has an empty identifier",
                index
            )));
        }
        if item.prompt().trim().is_empty() {
            return Err(LabError::invalid_job(format!(
                "Work item {} ({}) has an empty prompt",
                index,
                item.id()
            )));
        }
    }

    Ok(())
}
