//! Error types
//!
//! Each layer gets its own enum. Only `AppError` crosses into HTTP handlers;
//! `ExternalServiceError` never leaves the video selector.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::path::PathBuf;
use thiserror::Error;

/// Startup-time configuration and content loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid content: {0}")]
    Content(String),

    #[error("{0} is not implemented")]
    Unsupported(String),
}

/// Failures talking to the external video search API.
#[derive(Debug, Error)]
pub enum ExternalServiceError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),
}

/// Persistence failures.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Entry already bookmarked")]
    AlreadyBookmarked,

    #[error("Email already registered")]
    EmailTaken,
}

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Db(DbError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Db(DbError::AlreadyBookmarked) => StatusCode::BAD_REQUEST,
            AppError::Db(DbError::EmailTaken) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Db(DbError::NotFound("entry")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Db(DbError::AlreadyBookmarked).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Db(DbError::EmailTaken).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Validation("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message_names_the_record() {
        assert_eq!(DbError::NotFound("bookmark").to_string(), "bookmark not found");
    }
}
