use crate::shared::error::RiskError;

/// Type alias for Result with anyhow::Error as the error type.
/// Used by adapters, configuration and other infrastructure code.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Result of a risk register operation exposed to callers.
pub type ServiceResult<T> = std::result::Result<T, RiskError>;
