/// Formatter adapters for the export document formats
mod csv_export_formatter;
mod json_export_formatter;

pub use csv_export_formatter::CsvExportFormatter;
pub use json_export_formatter::JsonExportFormatter;
