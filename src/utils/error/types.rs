//! Error types for the batch lab

use crate::core::completion::ServiceError;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, LabError>;

/// Main error type
#[derive(Error, Debug)]
pub enum LabError {
    /// Empty or malformed batch submission, rejected at call time
    #[error("Invalid job: {0}")]
    InvalidJob(String),

    /// Results were requested before the job reached a terminal state
    #[error("Job {job_id} is not complete (status: {status})")]
    JobNotComplete { job_id: String, status: String },

    /// No job is registered under the given handle
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Completion service errors raised outside of a batch
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Question bank errors (missing columns, duplicate ids, bad selection)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Placeholder substitution errors
    #[error("Template error: {0}")]
    Template(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
