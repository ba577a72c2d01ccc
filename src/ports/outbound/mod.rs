/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (storage, export rendering, output).
pub mod export_formatter;
pub mod output_presenter;
pub mod risk_repository;

pub use export_formatter::RiskExportFormatter;
pub use output_presenter::OutputPresenter;
pub use risk_repository::RiskRepository;
