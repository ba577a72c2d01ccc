use crate::adapters::outbound::formatters::{CsvExportFormatter, JsonExportFormatter};
use crate::application::dto::ExportFormat;
use crate::ports::outbound::RiskExportFormatter;

/// Factory for creating export formatters
///
/// This factory encapsulates the choice of formatter implementation for an
/// export format. It belongs in the application layer as it selects
/// infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified export format
    ///
    /// # Examples
    /// ```
    /// use risk_register::application::dto::ExportFormat;
    /// use risk_register::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(ExportFormat::Csv);
    /// assert_eq!(formatter.format(&[]).unwrap().lines().count(), 1);
    /// ```
    pub fn create(format: ExportFormat) -> Box<dyn RiskExportFormatter> {
        match format {
            ExportFormat::Json => Box::new(JsonExportFormatter::new()),
            ExportFormat::Csv => Box::new(CsvExportFormatter::new()),
        }
    }
}
