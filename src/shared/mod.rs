/// Shared kernel - error types, result aliases and file safety checks
pub mod error;
pub mod result;
pub mod security;

pub use error::{ExitCode, FieldViolation, RiskError};
pub use result::{Result, ServiceResult};
