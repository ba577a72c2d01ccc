/// Data Transfer Objects for application layer
///
/// DTOs carry caller input into the use cases and results back out,
/// keeping the domain layer free of wire concerns.
mod export_document;
mod export_format;
mod risk_input;
mod risk_page;
mod risk_query_request;

pub use export_document::ExportDocument;
pub use export_format::ExportFormat;
pub use risk_input::RiskInput;
pub use risk_page::RiskPage;
pub use risk_query_request::{ExportRequest, RiskQueryRequest};
