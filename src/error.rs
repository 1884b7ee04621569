//! Error types for the TFVC client.

use uuid::Uuid;

use thiserror::Error;

/// Main error type for the TFVC client.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The service does not expose the requested resource location.
    #[error("no API resource location {location_id} on {base_url}")]
    ResourceNotFound { location_id: Uuid, base_url: String },

    /// The requested API version is older than what the server still serves.
    #[error("API version {requested} is no longer supported (server minimum is {supported})")]
    UnsupportedApiVersion { requested: String, supported: String },

    /// TFVC service error
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Typed errors for TFVC service responses.
///
/// Each variant corresponds to a status class of the web API. `type_key`
/// carries the server-side exception type from the wrapped error body
/// (e.g. "ChangesetNotFoundException") when the service provided one.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// Raised when credentials are missing or rejected (401).
    #[error("[{type_key}] {message}")]
    Authentication { type_key: String, message: String },

    /// Raised when access is denied (403).
    #[error("[{type_key}] {message}")]
    Authorization { type_key: String, message: String },

    /// Raised when a path, changeset, label, or shelveset is not found (404).
    #[error("[{type_key}] {message}")]
    NotFound { type_key: String, message: String },

    /// Raised on conflicting state (409).
    #[error("[{type_key}] {message}")]
    Conflict { type_key: String, message: String },

    /// Raised when rate limited (429).
    #[error("[{type_key}] {message} (retry after {retry_after}s)")]
    RateLimited {
        type_key: String,
        message: String,
        retry_after: u32,
    },

    /// Raised on request validation failures (other 4xx).
    #[error("[{type_key}] {message}")]
    Validation { type_key: String, message: String },

    /// Raised on server errors (5xx).
    #[error("[{type_key}] {message}")]
    Server { type_key: String, message: String },
}

impl ServiceError {
    /// Get the server exception type key.
    #[must_use]
    pub fn type_key(&self) -> &str {
        match self {
            Self::Authentication { type_key, .. }
            | Self::Authorization { type_key, .. }
            | Self::NotFound { type_key, .. }
            | Self::Conflict { type_key, .. }
            | Self::RateLimited { type_key, .. }
            | Self::Validation { type_key, .. }
            | Self::Server { type_key, .. } => type_key,
        }
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message, .. }
            | Self::Authorization { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => message,
        }
    }

    /// Get the retry-after value for rate limited errors.
    #[must_use]
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_accessors() {
        let error = ServiceError::NotFound {
            type_key: "ChangesetNotFoundException".to_string(),
            message: "The changeset 42 could not be found.".to_string(),
        };

        assert_eq!(error.type_key(), "ChangesetNotFoundException");
        assert_eq!(error.message(), "The changeset 42 could not be found.");
        assert_eq!(error.retry_after(), None);
    }

    #[test]
    fn test_rate_limited_error() {
        let error = ServiceError::RateLimited {
            type_key: "RequestThrottledException".to_string(),
            message: "Too many requests".to_string(),
            retry_after: 30,
        };

        assert_eq!(error.retry_after(), Some(30));
        assert!(error.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        let auth_error = ServiceError::Authentication {
            type_key: "UnauthorizedRequestException".to_string(),
            message: "The personal access token was rejected".to_string(),
        };
        assert!(!auth_error.is_retryable());

        let not_found = ServiceError::NotFound {
            type_key: "ItemNotFoundException".to_string(),
            message: "$/Fabrikam/missing.cs does not exist".to_string(),
        };
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_server_error_is_retryable() {
        let error = ServiceError::Server {
            type_key: "VssServiceException".to_string(),
            message: "Internal server error".to_string(),
        };

        assert!(error.is_retryable());
    }

    #[test]
    fn test_display_includes_type_key() {
        let error = ServiceError::Validation {
            type_key: "InvalidArgumentValueException".to_string(),
            message: "maxCommentLength must be positive".to_string(),
        };

        let rendered = error.to_string();
        assert!(rendered.contains("InvalidArgumentValueException"));
        assert!(rendered.contains("maxCommentLength"));
    }
}
