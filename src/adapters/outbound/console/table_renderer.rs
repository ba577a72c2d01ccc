use crate::application::dto::RiskPage;
use crate::risk_scoring::domain::{Band, RiskMatrix, RiskSummary, Status};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Longest title shown in a listing row before it is cut with `…`
const TITLE_WIDTH: usize = 48;

/// TableRenderer adapter - plain-text tables for a terminal
///
/// Bands are colored Low green, Moderate yellow, High orange and Critical
/// red when color is enabled. Content is identical with color off.
pub struct TableRenderer {
    color: bool,
}

impl TableRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Color on when stdout is a terminal and `NO_COLOR` is unset
    pub fn for_stdout() -> Self {
        use std::io::IsTerminal;
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(color)
    }

    fn paint_band(&self, band: Band, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match band {
            Band::Low => text.green().to_string(),
            Band::Moderate => text.yellow().to_string(),
            Band::High => text.truecolor(255, 165, 0).to_string(),
            Band::Critical => text.red().bold().to_string(),
        }
    }

    fn band_cell(&self, band: Band, width: usize) -> String {
        self.paint_band(band, &format!("{:<width$}", band.as_str(), width = width))
    }

    pub fn render_page(&self, page: &RiskPage) -> String {
        let mut out = String::new();

        if page.items.is_empty() {
            out.push_str("No risks match the current filters.\n");
        } else {
            let _ = writeln!(
                out,
                "{:<36}  {:>3}  {:<8}  {:<10}  {:>3}  {:>3}  TITLE",
                "ID", "SEV", "BAND", "STATUS", "L", "I"
            );
            for risk in &page.items {
                let _ = writeln!(
                    out,
                    "{:<36}  {:>3}  {}  {:<10}  {:>3}  {:>3}  {}",
                    risk.id(),
                    risk.severity(),
                    self.band_cell(risk.band(), 8),
                    risk.status().as_str(),
                    risk.likelihood(),
                    risk.impact(),
                    truncate(risk.title(), TITLE_WIDTH)
                );
            }
        }

        let _ = write!(
            out,
            "Page {}/{} · {} risk(s) · {} per page",
            page.page, page.total_pages, page.total, page.page_size
        );
        out
    }

    pub fn render_matrix(&self, matrix: &RiskMatrix) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Likelihood ↓ / Impact →");
        let _ = writeln!(out, "      {}", (1..=5).map(|i| format!("{:^7}", i)).collect::<String>());

        for row in matrix.rows() {
            let Some(first) = row.first() else {
                continue;
            };
            let _ = write!(out, "  {}   ", first.likelihood);
            for cell in row {
                let text = format!("{:^7}", format!("[{}]", cell.count));
                out.push_str(&self.paint_band(cell.band, &text));
            }
            out.push('\n');
        }

        let _ = write!(out, "Total: {}", matrix.total());
        out
    }

    pub fn render_summary(&self, summary: &RiskSummary) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total risks: {}", summary.total);
        for band in Band::ALL.iter().rev() {
            let _ = writeln!(
                out,
                "  {}  {}",
                self.band_cell(*band, 9),
                summary.count_for_band(*band)
            );
        }
        let statuses: Vec<String> = Status::ALL
            .iter()
            .map(|status| format!("{} {}", status.as_str(), summary.count_for_status(*status)))
            .collect();
        let _ = write!(out, "Status: {}", statuses.join(" · "));
        out
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}
