//! Per-request completion errors

use thiserror::Error;

/// Failure of a single completion call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The service implementation panicked while handling the request
    #[error("Completion service panicked: {0}")]
    Panicked(String),
}

impl ServiceError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn rate_limit<S: Into<String>>(message: S, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication(message.into())
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn server<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn panicked<S: Into<String>>(message: S) -> Self {
        Self::Panicked(message.into())
    }

    /// Map a non-success HTTP status and body to an error
    pub fn from_status(status: u16, body: &str, retry_after: Option<u64>) -> Self {
        match status {
            401 | 403 => Self::authentication(format!("HTTP {}: {}", status, body)),
            408 => Self::timeout(format!("HTTP {}: {}", status, body)),
            429 => Self::rate_limit(format!("HTTP {}: {}", status, body), retry_after),
            400..=499 => Self::invalid_request(format!("HTTP {}: {}", status, body)),
            _ => Self::server(status, body),
        }
    }

    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_)
            | Self::Timeout(_)
            | Self::RateLimit { .. }
            | Self::Server { .. }
            | Self::MalformedResponse(_) => true,

            Self::Authentication(_) | Self::InvalidRequest(_) | Self::Panicked(_) => false,
        }
    }

    /// Whether the service could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }

    /// Short kind name, stable across message changes
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::RateLimit { .. } => "rate_limit",
            Self::Authentication(_) => "authentication",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Server { .. } => "server",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Panicked(_) => "panicked",
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), &err.to_string(), None)
        } else {
            Self::Network(err.to_string())
        }
    }
}
