//! Common error types and handling for the ArtCafe API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Postgres SQLSTATE codes that point at bad caller input rather than
/// a broken store: invalid text representation and string truncation.
const INPUT_SQLSTATES: [&str; 2] = ["22P02", "22001"];

/// Application error type shared by every domain router
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// The store refused a write because of the caller's input
    #[error("Store rejected the request: {0}")]
    Store(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Access denied: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Authentication(_) | Error::MalformedToken(_) | Error::Authorization(_) => {
                StatusCode::FORBIDDEN
            }
            Error::Validation(_) | Error::Store(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Database(_)
            | Error::Configuration(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Database(_) => "DATABASE_ERROR",
            Error::Store(_) => "STORE_ERROR",
            Error::Authentication(_) => "AUTH_FAILURE",
            Error::MalformedToken(_) => "MALFORMED_TOKEN",
            Error::Authorization(_) => "FORBIDDEN",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return Error::NotFound("Record not found".to_string());
        }

        let caller_input = err.as_database_error().is_some_and(|db| {
            matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) || db
                .code()
                .is_some_and(|code| INPUT_SQLSTATES.iter().any(|s| *s == code))
        });

        if caller_input {
            Error::Store(err.to_string())
        } else {
            Error::Database(err)
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Infrastructure failures are logged here; the body stays generic
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal server error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
