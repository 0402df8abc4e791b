//! Error types for taskdesk
//!
//! Exit codes:
//! - 0: Success
//! - 2: Validation failed or bad arguments
//! - 3: Entity not found
//! - 4: Access denied
//! - 5: Conflict (category still referenced)
//! - 6: Operation failed (IO, state file, lock)

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Exit codes for the taskdesk CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const FORBIDDEN: i32 = 4;
    pub const CONFLICT: i32 = 5;
    pub const OPERATION_FAILED: i32 = 6;
}

/// A single field-level constraint violation.
///
/// Validation collects every violation before failing, so errors always carry
/// the complete list rather than the first one encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main error type for taskdesk operations
#[derive(Error, Debug)]
pub enum Error {
    // Domain failures
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    #[error("access denied: {0}")]
    Forbidden(String),

    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("conflict: {0}")]
    Conflict(String),

    // Transport-level user errors
    #[error("no authenticated user: pass --user or set TASKDESK_USER")]
    MissingUser,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    /// Build a validation error from a single field violation.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation(vec![FieldError::new(field, message)])
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) | Error::MissingUser | Error::InvalidArgument(_) => {
                exit_codes::VALIDATION
            }
            Error::NotFound { .. } => exit_codes::NOT_FOUND,
            Error::Forbidden(_) => exit_codes::FORBIDDEN,
            Error::Conflict(_) => exit_codes::CONFLICT,
            Error::InvalidConfig(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Stable machine-readable kind, used by the JSON error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "not_found",
            Error::Forbidden(_) => "forbidden",
            Error::Validation(_) => "validation_failed",
            Error::Conflict(_) => "conflict",
            Error::MissingUser | Error::InvalidArgument(_) => "user_error",
            _ => "operation_failed",
        }
    }

    /// Structured details for the JSON error envelope (the full field-error
    /// list for validation failures, nothing otherwise).
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }
}

/// Result type alias for taskdesk operations
pub type Result<T> = std::result::Result<T, Error>;
