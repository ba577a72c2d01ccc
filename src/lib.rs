//! risk-register - risk scoring and query engine
//!
//! Records organizational risks, scores each one from its likelihood and
//! impact ratings (1-5) into a severity and a qualitative band, and answers
//! filtered, sorted and paginated queries over the register, including bulk
//! export to JSON or CSV, the 5×5 likelihood/impact matrix and headline
//! counts.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`risk_scoring`): Risk model, filters, scoring policy
//! - **Application Layer** (`application`): Validation, query engine and the CRUD use case
//! - **Ports** (`ports`): Interface definitions for callers and infrastructure
//! - **Adapters** (`adapters`): Storage, export formatters and output
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```
//! use risk_register::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> std::result::Result<(), RiskError> {
//! let register = ManageRisksUseCase::new(InMemoryRiskRepository::new());
//!
//! let risk = register
//!     .create_risk(
//!         RiskInput::new()
//!             .with_title("Server outage")
//!             .with_likelihood(3)
//!             .with_impact(4),
//!     )
//!     .await?;
//! assert_eq!(risk.severity(), 12);
//! assert_eq!(risk.band(), Band::High);
//!
//! let page = register
//!     .list_risks(RiskQueryRequest::new().with_band("High"))
//!     .await?;
//! assert_eq!(page.total, 1);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod risk_scoring;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::TableRenderer;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{CsvExportFormatter, JsonExportFormatter};
    pub use crate::adapters::outbound::storage::{InMemoryRiskRepository, JsonFileRiskRepository};
    pub use crate::application::dto::{
        ExportDocument, ExportFormat, ExportRequest, RiskInput, RiskPage, RiskQueryRequest,
    };
    pub use crate::application::factories::FormatterFactory;
    pub use crate::application::services::{QueryEngine, RiskValidator};
    pub use crate::application::use_cases::{ManageRisksUseCase, DEFAULT_EXPORT_BULK_SIZE};
    pub use crate::ports::inbound::RiskManagementPort;
    pub use crate::ports::outbound::{OutputPresenter, RiskExportFormatter, RiskRepository};
    pub use crate::risk_scoring::domain::{
        Band, MatrixCell, Rating, Risk, RiskDraft, RiskFilter, RiskId, RiskMatrix, RiskPatch,
        RiskQuery, RiskSummary, SortKey, SortOrder, SortSpec, Status,
    };
    pub use crate::risk_scoring::policies::SeverityPolicy;
    pub use crate::shared::{ExitCode, FieldViolation, Result, RiskError, ServiceResult};
}
