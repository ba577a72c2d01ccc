use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let scripts distinguish rejected input from missing records
/// and from genuine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// The request was rejected by validation
    ValidationFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (storage failure, file I/O error, etc.)
    ApplicationError = 3,
    /// The referenced risk does not exist
    NotFound = 4,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ValidationFailed => write!(f, "Validation Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::NotFound => write!(f, "Not Found (4)"),
        }
    }
}

/// A single rejected input field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors surfaced by the risk register to its callers.
///
/// The three variants are the whole taxonomy a caller has to handle:
/// rejected input, a missing record, or anything else.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Invalid input:\n{}\n\n💡 Hint: Fix the listed fields and try again", format_violations(.violations))]
    Validation { violations: Vec<FieldViolation> },

    #[error("Risk not found: {id}")]
    NotFound { id: String },

    /// Detail stays in the logs; callers only see the generic message.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RiskError {
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        RiskError::Validation { violations }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        RiskError::NotFound { id: id.into() }
    }

    pub fn internal() -> Self {
        RiskError::Internal {
            message: "the operation could not be completed".to_string(),
        }
    }

    /// Violated fields, empty for non-validation errors
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            RiskError::Validation { violations } => violations,
            _ => &[],
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            RiskError::Validation { .. } => ExitCode::ValidationFailed,
            RiskError::NotFound { .. } => ExitCode::NotFound,
            RiskError::Internal { .. } => ExitCode::ApplicationError,
        }
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}
