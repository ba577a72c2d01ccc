use crate::risk_scoring::domain::Risk;
use crate::shared::Result;

/// RiskExportFormatter port for rendering a bulk export
///
/// Implementations turn the filtered and sorted collection into a single
/// document (structured JSON, delimited text, ...).
pub trait RiskExportFormatter: Send + Sync {
    /// Renders the risks, preserving their order
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, risks: &[Risk]) -> Result<String>;
}
