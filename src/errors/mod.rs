//! Error handling module for the globe backend.
//!
//! Provides a centralized error type with mapping to HTTP status codes.
//! Failures are surfaced to HTTP clients as plain-text messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Primary-key or unique-constraint violation
    Duplicate(String),
    /// Resource not found
    NotFound(String),
    /// Malformed request
    BadRequest(String),
    /// Database error
    Database(String),
    /// CSV read or parse error
    Csv(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            AppError::Duplicate(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Database(msg)
            | AppError::Csv(msg) => msg,
        }
    }

    /// True for unique-constraint violations, the expected failure when the
    /// seed loader is re-run against an already-populated store.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AppError::Duplicate(_))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return AppError::Duplicate(format!("Duplicate key: {}", db_err));
            }
        }
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        tracing::error!("CSV error: {:?}", err);
        AppError::Csv(format!("CSV error: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message().to_string();
        (status, message).into_response()
    }
}
