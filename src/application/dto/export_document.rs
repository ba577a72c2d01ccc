use super::ExportFormat;
use chrono::NaiveDate;

/// ExportDocument - a rendered bulk export ready to be presented
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub format: ExportFormat,
    pub content: String,
    /// Suggested download name, e.g. `riesgos-2024-05-01.csv`
    pub filename: String,
    pub record_count: usize,
}

impl ExportDocument {
    pub fn new(format: ExportFormat, content: String, date: NaiveDate, record_count: usize) -> Self {
        Self {
            format,
            content,
            filename: format!("riesgos-{}.{}", date.format("%Y-%m-%d"), format.file_extension()),
            record_count,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}
