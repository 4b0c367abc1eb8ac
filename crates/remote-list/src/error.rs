//! Error taxonomy for remote collection access.

use serde::Serialize;
use thiserror::Error;

/// Result alias used throughout the crate
pub type ListResult<T> = Result<T, ListError>;

/// Failures a remote collection call can end in.
///
/// None of these are fatal: every variant means "the operation did not
/// happen" and the controller state is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ListError {
    /// Transport or connectivity failure, including 5xx responses
    #[error("network error: {0}")]
    Network(String),
    /// The server answered, but not with the shape we expected
    #[error("unexpected response: {0}")]
    Protocol(String),
    /// The server (or local pre-checks) rejected the request
    #[error("{0}")]
    Validation(String),
}

impl ListError {
    /// Short message suitable for a pop-up notification
    pub fn user_message(&self) -> String {
        match self {
            ListError::Network(_) => "Could not reach the server. Check your connection.".to_string(),
            ListError::Protocol(_) => "The server sent something we could not read.".to_string(),
            ListError::Validation(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for ListError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ListError::Protocol(err.to_string())
        } else {
            ListError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = ListError::Validation("Name is required".into());
        assert_eq!(err.user_message(), "Name is required");
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn network_message_hides_transport_details() {
        let err = ListError::Network("connection refused (os error 111)".into());
        assert!(!err.user_message().contains("os error"));
        assert!(err.to_string().starts_with("network error"));
    }
}
