//! Error types for registry-visibility
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors that are part of the API,
//! and convert to HTTP responses at the boundary (see [`http`]).

pub mod http;

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

/// Errors raised by the user, endpoint and registry stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<u32>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Orchestrator (Kubernetes) client errors
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Unable to retrieve kubernetes client: {0}")]
    ClientUnavailable(String),

    #[error("Unable to retrieve endpoint's namespaces policies: {0}")]
    PolicyFetchFailed(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response from orchestrator: {0}")]
    InvalidResponse(String),
}

impl OrchestratorError {
    /// Create an appropriate error from an HTTP status code and response body
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, body)
        };
        match status {
            401 | 403 => OrchestratorError::ClientUnavailable(detail),
            _ => OrchestratorError::PolicyFetchFailed(detail),
        }
    }
}

/// Outcome of a failed registry visibility decision
#[derive(Error, Debug)]
pub enum VisibilityError {
    #[error("user is not authorized to use namespace '{namespace}'")]
    Forbidden { namespace: String },

    #[error(transparent)]
    NamespaceCheck(#[from] OrchestratorError),
}

/// Request-level failure, mapped to an HTTP status at the boundary
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}: {details}")]
    BadInput { message: String, details: String },

    #[error("{message}: {details}")]
    NotFound { message: String, details: String },

    #[error("{message}: {details}")]
    Forbidden { message: String, details: String },

    #[error("{message}: {details}")]
    Internal { message: String, details: String },
}

impl ApiError {
    pub fn bad_input(message: impl Into<String>, details: impl ToString) -> Self {
        ApiError::BadInput {
            message: message.into(),
            details: details.to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>, details: impl ToString) -> Self {
        ApiError::NotFound {
            message: message.into(),
            details: details.to_string(),
        }
    }

    pub fn forbidden(message: impl Into<String>, details: impl ToString) -> Self {
        ApiError::Forbidden {
            message: message.into(),
            details: details.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>, details: impl ToString) -> Self {
        ApiError::Internal {
            message: message.into(),
            details: details.to_string(),
        }
    }

    /// Short message shown to the caller
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadInput { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Forbidden { message, .. }
            | ApiError::Internal { message, .. } => message,
        }
    }

    /// Underlying cause
    pub fn details(&self) -> &str {
        match self {
            ApiError::BadInput { details, .. }
            | ApiError::NotFound { details, .. }
            | ApiError::Forbidden { details, .. }
            | ApiError::Internal { details, .. } => details,
        }
    }
}

impl From<VisibilityError> for ApiError {
    fn from(err: VisibilityError) -> Self {
        match err {
            VisibilityError::Forbidden { .. } => {
                ApiError::forbidden("User is not authorized to use namespace", &err)
            }
            // A failed namespace check is reported as not found, matching
            // how the registries endpoint has always answered it.
            VisibilityError::NamespaceCheck(cause) => {
                ApiError::not_found("Unable to check for namespace authorization", cause)
            }
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for orchestrator operations
pub type OrchestratorResult<T> = std::result::Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orchestrator_error_from_response() {
        assert!(matches!(
            OrchestratorError::from_response(401, ""),
            OrchestratorError::ClientUnavailable(_)
        ));

        assert!(matches!(
            OrchestratorError::from_response(403, "forbidden"),
            OrchestratorError::ClientUnavailable(_)
        ));

        let err = OrchestratorError::from_response(500, "etcd timeout");
        assert!(matches!(err, OrchestratorError::PolicyFetchFailed(_)));
        assert!(err.to_string().contains("etcd timeout"));
    }

    #[test]
    fn test_store_error_not_found() {
        let err = StoreError::not_found("endpoint", 7u32);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "endpoint 7 not found");

        assert!(!StoreError::Unavailable("locked".into()).is_not_found());
    }

    #[test]
    fn test_visibility_error_into_api_error() {
        let err: ApiError = VisibilityError::Forbidden {
            namespace: "team-a".into(),
        }
        .into();
        assert!(matches!(err, ApiError::Forbidden { .. }));
        assert_eq!(err.message(), "User is not authorized to use namespace");
        assert!(err.details().contains("team-a"));

        let err: ApiError = VisibilityError::NamespaceCheck(
            OrchestratorError::PolicyFetchFailed("boom".into()),
        )
        .into();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert!(err.details().contains("boom"));
    }
}
