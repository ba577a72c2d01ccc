use crate::application::dto::{ExportDocument, ExportRequest, RiskInput, RiskPage, RiskQueryRequest};
use crate::risk_scoring::domain::{Risk, RiskMatrix, RiskSummary};
use crate::shared::ServiceResult;
use async_trait::async_trait;

/// RiskManagementPort - Inbound port of the risk register
///
/// This is the request/response contract external adapters (CLI, HTTP
/// handlers, tests) use to drive the register. Every operation fails with
/// [`RiskError::Validation`](crate::shared::RiskError::Validation) on bad
/// input, [`RiskError::NotFound`](crate::shared::RiskError::NotFound) for an
/// unknown id, or [`RiskError::Internal`](crate::shared::RiskError::Internal)
/// when storage fails.
#[async_trait]
pub trait RiskManagementPort: Send + Sync {
    /// Validates, scores and stores a new risk
    async fn create_risk(&self, input: RiskInput) -> ServiceResult<Risk>;

    /// Reads one risk by id
    async fn get_risk(&self, id: &str) -> ServiceResult<Risk>;

    /// Applies a partial update, re-deriving severity and band when a rating changes
    async fn update_risk(&self, id: &str, input: RiskInput) -> ServiceResult<Risk>;

    /// Deletes a risk; a second delete of the same id is not-found
    async fn delete_risk(&self, id: &str) -> ServiceResult<()>;

    /// Lists one page of the filtered, sorted register
    async fn list_risks(&self, request: RiskQueryRequest) -> ServiceResult<RiskPage>;

    /// Renders the whole filtered, sorted register as one document
    async fn export_risks(&self, request: ExportRequest) -> ServiceResult<ExportDocument>;

    /// Aggregates the filtered register onto the 5×5 likelihood/impact grid
    async fn risk_matrix(&self, request: RiskQueryRequest) -> ServiceResult<RiskMatrix>;

    /// Counts the filtered register per band and per status
    async fn risk_summary(&self, request: RiskQueryRequest) -> ServiceResult<RiskSummary>;
}
