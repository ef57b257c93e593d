//! Error types for the signpost client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, service, and input validation errors, plus
//! the coarse [`ErrorKind`] classification that drives credential
//! revocation and flow recovery.

use std::fmt;
use thiserror::Error;

/// The unified error type for signpost operations.
///
/// This error type covers all possible failure modes in the client,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected password, bad or expired token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Errors reported by the sign service itself.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Input validation errors (invalid service URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Coarse failure classification carried by a completed call's error.
///
/// Only `Unauthenticated` revokes a held credential; everything else is
/// surfaced to the caller without touching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The credential was rejected, expired, or missing.
    Unauthenticated,
    /// The service could not be reached or is temporarily down.
    Unavailable,
    /// Any other failure.
    Other,
}

impl Error {
    /// Classify this error for credential and flow handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Auth(_) => ErrorKind::Unauthenticated,
            Error::Transport(_) => ErrorKind::Unavailable,
            Error::Service(err) if err.is_auth_error() => ErrorKind::Unauthenticated,
            Error::Service(err) if err.is_unavailable() => ErrorKind::Unavailable,
            Error::Service(_) | Error::InvalidInput(_) => ErrorKind::Other,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The supplied password was rejected.
    #[error("incorrect password")]
    IncorrectPassword,

    /// No token was supplied with an authenticated call.
    #[error("authentication token not provided")]
    TokenMissing,

    /// The supplied token is not one the service issued.
    #[error("invalid token")]
    TokenInvalid,

    /// The supplied token has expired.
    #[error("token expired")]
    TokenExpired,
}

/// An error response from the sign service.
#[derive(Debug)]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Create a new service error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || self.error.as_deref() == Some("IncorrectPassword")
            || self.error.as_deref() == Some("InvalidToken")
            || self.error.as_deref() == Some("ExpiredToken")
    }

    /// Check if this indicates the service is temporarily unavailable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self.status, 502 | 503 | 504)
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid service URL format.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_classify_as_unauthenticated() {
        let err = Error::Auth(AuthError::TokenExpired);
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[test]
    fn transport_errors_classify_as_unavailable() {
        let err = Error::Transport(TransportError::Connection {
            message: "connection refused".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn service_401_classifies_as_unauthenticated() {
        let err = Error::Service(ServiceError::new(401, None, None));
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[test]
    fn service_auth_code_classifies_as_unauthenticated() {
        let err = Error::Service(ServiceError::new(
            400,
            Some("ExpiredToken".into()),
            Some("Token has expired".into()),
        ));
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[test]
    fn service_503_classifies_as_unavailable() {
        let err = Error::Service(ServiceError::new(503, None, Some("maintenance".into())));
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn other_service_errors_classify_as_other() {
        let err = Error::Service(ServiceError::new(
            400,
            Some("InvalidArgument".into()),
            Some("Neither images or text supplied".into()),
        ));
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn service_error_display_includes_code_and_message() {
        let err = ServiceError::new(401, Some("ExpiredToken".into()), Some("expired".into()));
        assert_eq!(err.to_string(), "HTTP 401 [ExpiredToken]: expired");
    }
}
