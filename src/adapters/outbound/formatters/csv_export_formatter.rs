use crate::ports::outbound::RiskExportFormatter;
use crate::risk_scoring::domain::Risk;
use crate::shared::Result;
use chrono::{DateTime, SecondsFormat, Utc};

/// Column labels of the CSV export, in column order
const CSV_HEADERS: [&str; 12] = [
    "ID",
    "Título",
    "Descripción",
    "Categoría",
    "Propietario",
    "Probabilidad",
    "Impacto",
    "Gravedad",
    "Banda",
    "Estado",
    "Creado",
    "Actualizado",
];

/// CsvExportFormatter adapter producing a spreadsheet-friendly export
///
/// Text columns are always double-quoted with embedded quotes doubled, so
/// commas and line breaks inside a field cannot shift columns. Band and
/// status use their Spanish display labels. Rows are separated by `\n`
/// and there is no trailing newline.
pub struct CsvExportFormatter;

impl CsvExportFormatter {
    pub fn new() -> Self {
        Self
    }

    fn quote(text: &str) -> String {
        format!("\"{}\"", text.replace('"', "\"\""))
    }

    fn timestamp(at: DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn row(risk: &Risk) -> String {
        [
            Self::quote(risk.id().as_str()),
            Self::quote(risk.title()),
            Self::quote(risk.description().unwrap_or_default()),
            Self::quote(risk.category().unwrap_or_default()),
            Self::quote(risk.owner().unwrap_or_default()),
            risk.likelihood().to_string(),
            risk.impact().to_string(),
            risk.severity().to_string(),
            Self::quote(risk.band().display_label()),
            Self::quote(risk.status().display_label()),
            Self::timestamp(risk.created_at()),
            Self::timestamp(risk.updated_at()),
        ]
        .join(",")
    }
}

impl Default for CsvExportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskExportFormatter for CsvExportFormatter {
    fn format(&self, risks: &[Risk]) -> Result<String> {
        let lines: Vec<String> = std::iter::once(CSV_HEADERS.join(","))
            .chain(risks.iter().map(Self::row))
            .collect();
        Ok(lines.join("\n"))
    }
}
