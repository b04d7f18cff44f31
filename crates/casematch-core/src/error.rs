//! Error types and exit codes for casematch
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (records that are not documents, unknown document ids)

mod macros;

use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - malformed records, unknown ids (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during casematch operations
#[derive(Error, Debug)]
pub enum CaseMatchError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    /// A record could not be coerced into a document
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl CaseMatchError {
    /// Create an error for a record that is not a valid document
    pub fn invalid_input(reason: impl std::fmt::Display) -> Self {
        CaseMatchError::InvalidInput {
            reason: reason.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        CaseMatchError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        CaseMatchError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        CaseMatchError::Other(format!("failed to {} {}: {}", operation, path, error))
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CaseMatchError::UnknownFormat(_)
            | CaseMatchError::UsageError(_)
            | CaseMatchError::InvalidValue { .. } => ExitCode::Usage,

            CaseMatchError::InvalidInput { .. } | CaseMatchError::NotFound { .. } => {
                ExitCode::Data
            }

            CaseMatchError::Io(_)
            | CaseMatchError::Json(_)
            | CaseMatchError::Toml(_)
            | CaseMatchError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            CaseMatchError::UnknownFormat(_) => "unknown_format",
            CaseMatchError::UsageError(_) => "usage_error",
            CaseMatchError::InvalidValue { .. } => "invalid_value",
            CaseMatchError::InvalidInput { .. } => "invalid_input",
            CaseMatchError::NotFound { .. } => "not_found",
            CaseMatchError::Io(_) => "io_error",
            CaseMatchError::Json(_) => "json_error",
            CaseMatchError::Toml(_) => "toml_error",
            CaseMatchError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for casematch operations
pub type Result<T> = std::result::Result<T, CaseMatchError>;
