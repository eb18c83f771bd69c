//! Harness errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur when talking to the commerce backend.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The token endpoint answered with a non-success status.
    #[error("Authentication failed: {}", .status.as_u16())]
    Authentication {
        /// Status returned by the token endpoint.
        status: StatusCode,
    },

    /// A success response did not contain what the endpoint promises.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Seed data the scenario depends on is missing from the backend.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Any other endpoint answered with a non-success status.
    #[error("Request failed: {} - {body}", .status.as_u16())]
    Request {
        /// Response status.
        status: StatusCode,
        /// Raw response body, kept for diagnosis.
        body: String,
    },

    /// Transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The harness configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl HarnessError {
    /// HTTP status carried by the error, if the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Authentication { status } | Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Result alias used throughout the client crate.
pub type Result<T, E = HarnessError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_error_display() {
        let err = HarnessError::Authentication {
            status: StatusCode::UNAUTHORIZED,
        };
        assert_eq!(err.to_string(), "Authentication failed: 401");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_request_error_keeps_body() {
        let err = HarnessError::Request {
            status: StatusCode::NOT_FOUND,
            body: r#"{"type":"not_found"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"Request failed: 404 - {"type":"not_found"}"#);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_precondition_has_no_status() {
        let err = HarnessError::Precondition("No regions available. Run seed data.".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }
}
