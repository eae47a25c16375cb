//! Authentication errors

use artcafe_common::Error;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Why a credential or session check was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The provider refused the credentials outright
    Rejected,
    /// The provider answered without a resolvable identity, email or token
    NoSession,
    /// No local record exists for the authenticated identity
    UserNotFound,
    /// The caller-supplied predicate refused the resolved record
    NotAllowed,
    /// The provider did not accept the session token
    InvalidSession,
    /// The user store failed while resolving the record
    Store,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureReason::Rejected => "credentials rejected",
            FailureReason::NoSession => "no user/session",
            FailureReason::UserNotFound => "user not found",
            FailureReason::NotAllowed => "not allowed",
            FailureReason::InvalidSession => "invalid session",
            FailureReason::Store => "user store failure",
        };
        f.write_str(text)
    }
}

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Fatal startup condition
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication failed: {reason}")]
    AuthFailure {
        reason: FailureReason,
        cause: Option<String>,
    },

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Bearer token required")]
    MissingToken,

    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,

    #[error("Access denied")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to load user")]
    UserLoadError,
}

impl AuthError {
    pub fn failure(reason: FailureReason) -> Self {
        AuthError::AuthFailure {
            reason,
            cause: None,
        }
    }

    pub fn failure_with(reason: FailureReason, cause: impl fmt::Display) -> Self {
        AuthError::AuthFailure {
            reason,
            cause: Some(cause.to_string()),
        }
    }

    /// Failure reason, if this is an `AuthFailure`
    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            AuthError::AuthFailure { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Configuration(msg) => Error::Configuration(msg),
            // Provider messages ("User already registered") are safe to surface;
            // store causes stay in the logs.
            AuthError::AuthFailure {
                reason: FailureReason::Rejected,
                cause: Some(cause),
            } => Error::Authentication(format!("{}: {}", FailureReason::Rejected, cause)),
            AuthError::AuthFailure { reason, cause } => {
                if let Some(cause) = cause {
                    tracing::debug!(%reason, %cause, "Authentication failure cause");
                }
                Error::Authentication(reason.to_string())
            }
            AuthError::MalformedToken(msg) => Error::MalformedToken(msg),
            AuthError::MissingToken => Error::Authentication("bearer token required".to_string()),
            AuthError::InvalidAuthorizationFormat => {
                Error::Authentication("invalid authorization header format".to_string())
            }
            AuthError::Forbidden => Error::Authorization("insufficient role".to_string()),
            AuthError::UserNotFound => Error::NotFound("User not found".to_string()),
            AuthError::UserLoadError => Error::Internal("Failed to load user".to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        Error::from(self).into_response()
    }
}
