use crate::ports::outbound::RiskExportFormatter;
use crate::risk_scoring::domain::Risk;
use crate::shared::Result;

/// JsonExportFormatter adapter rendering the export as a pretty JSON array
///
/// Records use the same camelCase shape as every other response.
pub struct JsonExportFormatter;

impl JsonExportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskExportFormatter for JsonExportFormatter {
    fn format(&self, risks: &[Risk]) -> Result<String> {
        Ok(serde_json::to_string_pretty(risks)?)
    }
}
