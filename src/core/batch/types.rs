//! Batch types and data structures

use crate::core::completion::ServiceError;
use crate::core::demographics::DemographicVariant;
use crate::core::prompts::PromptTemplate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Batch job identifier
pub type JobId = Uuid;

/// One prompt to complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    id: String,
    prompt: String,
    variant: Option<DemographicVariant>,
}

impl WorkItem {
    /// Create an item from a question id and its rendered prompt
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            variant: None,
        }
    }

    /// Attach the demographic variant the prompt was rendered with
    pub fn with_variant(mut self, variant: DemographicVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn variant(&self) -> Option<&DemographicVariant> {
        self.variant.as_ref()
    }

    pub fn variant_label(&self) -> Option<&str> {
        self.variant.as_ref().map(|v| v.label.as_str())
    }
}

/// Batch processing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Accepted, workers not started yet
    Pending,
    /// Items are being dispatched
    Running,
    /// Every item has a result
    Completed,
    /// The service was unreachable for every item
    Failed,
    /// Stopped before every item was dispatched
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// Work items submitted together against one prompt template
#[derive(Debug, Clone)]
pub struct BatchJob {
    id: JobId,
    items: Vec<WorkItem>,
    template: PromptTemplate,
    status: JobStatus,
    created_at: DateTime<Utc>,
}

impl BatchJob {
    pub fn new(items: Vec<WorkItem>, template: PromptTemplate) -> Self {
        Self {
            id: Uuid::new_v4(),
            items,
            template,
            status: JobStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Always `Pending` until handed to a coordinator
    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn into_parts(self) -> (JobId, Vec<WorkItem>, PromptTemplate, DateTime<Utc>) {
        (self.id, self.items, self.template, self.created_at)
    }
}

/// Recorded outcome for one work item
#[derive(Debug, Clone)]
pub struct WorkResult {
    sequence: usize,
    item: WorkItem,
    outcome: Result<String, ServiceError>,
    attempts: u32,
    completed_at: DateTime<Utc>,
}

impl WorkResult {
    pub(crate) fn new(
        sequence: usize,
        item: WorkItem,
        outcome: Result<String, ServiceError>,
        attempts: u32,
    ) -> Self {
        Self {
            sequence,
            item,
            outcome,
            attempts,
            completed_at: Utc::now(),
        }
    }

    /// Position of the item in the submitted job
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn item(&self) -> &WorkItem {
        &self.item
    }

    pub fn id(&self) -> &str {
        self.item.id()
    }

    pub fn prompt(&self) -> &str {
        self.item.prompt()
    }

    pub fn variant_label(&self) -> Option<&str> {
        self.item.variant_label()
    }

    pub fn outcome(&self) -> &Result<String, ServiceError> {
        &self.outcome
    }

    pub fn response(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(String::as_str)
    }

    pub fn error(&self) -> Option<&ServiceError> {
        self.outcome.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

/// Caller's reference to a submitted job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobHandle {
    id: JobId,
}

impl JobHandle {
    pub(crate) fn new(id: JobId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> JobId {
        self.id
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Point-in-time progress of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub job_id: JobId,
    pub status: JobStatus,
    pub total: usize,
    /// Items with a recorded result
    pub completed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ProgressSnapshot {
    /// Whole percent of items with a result
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u8
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
