//! Helper functions for creating specific error types

use super::types::LabError;

impl LabError {
    pub fn invalid_job<S: Into<String>>(message: S) -> Self {
        Self::InvalidJob(message.into())
    }

    pub fn job_not_found<S: Into<String>>(job_id: S) -> Self {
        Self::JobNotFound(job_id.into())
    }

    pub fn job_not_complete<S: Into<String>, T: Into<String>>(job_id: S, status: T) -> Self {
        Self::JobNotComplete {
            job_id: job_id.into(),
            status: status.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn dataset<S: Into<String>>(message: S) -> Self {
        Self::Dataset(message.into())
    }

    pub fn template<S: Into<String>>(message: S) -> Self {
        Self::Template(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error was raised by caller misuse rather than the environment
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidJob(_) | Self::JobNotComplete { .. } | Self::JobNotFound(_)
        )
    }
}
