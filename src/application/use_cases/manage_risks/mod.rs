use crate::application::dto::{
    ExportDocument, ExportFormat, ExportRequest, RiskInput, RiskPage, RiskQueryRequest,
};
use crate::application::factories::FormatterFactory;
use crate::application::services::{QueryEngine, RiskValidator};
use crate::ports::inbound::RiskManagementPort;
use crate::ports::outbound::RiskRepository;
use crate::risk_scoring::domain::{
    Risk, RiskFilter, RiskId, RiskMatrix, RiskSummary, SortSpec,
};
use crate::shared::{RiskError, ServiceResult};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, info, warn};

/// Number of records a bulk read (export, matrix, summary) fetches at most
pub const DEFAULT_EXPORT_BULK_SIZE: usize = 1000;

/// ManageRisksUseCase - CRUD orchestrator of the risk register
///
/// Ties validation, scoring and the query engine to the injected storage
/// collaborator. The use case keeps no state between requests; everything
/// durable lives behind `R`, whose lifecycle belongs to the caller.
///
/// # Type Parameters
/// * `R` - RiskRepository implementation
pub struct ManageRisksUseCase<R> {
    repository: R,
    export_bulk_size: usize,
    default_export_format: ExportFormat,
}

impl<R: RiskRepository> ManageRisksUseCase<R> {
    /// Creates a new ManageRisksUseCase with an injected repository
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            export_bulk_size: DEFAULT_EXPORT_BULK_SIZE,
            default_export_format: ExportFormat::default(),
        }
    }

    /// Overrides the bulk read size; values below 1 are raised to 1
    pub fn with_export_bulk_size(mut self, export_bulk_size: usize) -> Self {
        self.export_bulk_size = export_bulk_size.max(1);
        self
    }

    /// Format used when an export request does not name one
    pub fn with_default_export_format(mut self, format: ExportFormat) -> Self {
        self.default_export_format = format;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Existence check performed before any mutation
    async fn require_existing(&self, id: &RiskId) -> ServiceResult<Risk> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| storage_failure("find_by_id", e))?
            .ok_or_else(|| RiskError::not_found(id.as_str()))
    }

    /// Reads the whole selection in one bulk window
    async fn fetch_selection(&self, filter: RiskFilter, sort: SortSpec) -> ServiceResult<Vec<Risk>> {
        let (risks, total) = QueryEngine::new(&self.repository)
            .fetch_bulk(filter, sort, self.export_bulk_size)
            .await
            .map_err(|e| storage_failure("list", e))?;

        if total > risks.len() {
            warn!(
                total,
                returned = risks.len(),
                bulk_size = self.export_bulk_size,
                "Bulk read truncated; raise export_bulk_size to include every match"
            );
        }

        Ok(risks)
    }
}

/// Logs storage detail and hides it from the caller
fn storage_failure(operation: &str, err: anyhow::Error) -> RiskError {
    error!(operation, error = %format!("{:#}", err), "Storage operation failed");
    RiskError::internal()
}

#[async_trait]
impl<R: RiskRepository> RiskManagementPort for ManageRisksUseCase<R> {
    async fn create_risk(&self, input: RiskInput) -> ServiceResult<Risk> {
        let draft = RiskValidator::validate_create(&input)?;

        let risk = self
            .repository
            .create(draft)
            .await
            .map_err(|e| storage_failure("create", e))?;

        info!(
            risk_id = %risk.id(),
            severity = risk.severity(),
            band = %risk.band(),
            "Created risk"
        );
        Ok(risk)
    }

    async fn get_risk(&self, id: &str) -> ServiceResult<Risk> {
        self.require_existing(&RiskId::new(id)).await
    }

    async fn update_risk(&self, id: &str, input: RiskInput) -> ServiceResult<Risk> {
        let patch = RiskValidator::validate_update(&input)?;
        let id = RiskId::new(id);

        self.require_existing(&id).await?;

        // A concurrent delete between the check and the write surfaces here.
        let updated = self
            .repository
            .update_by_id(&id, &patch)
            .await
            .map_err(|e| storage_failure("update_by_id", e))?
            .ok_or_else(|| RiskError::not_found(id.as_str()))?;

        info!(
            risk_id = %updated.id(),
            rescored = patch.touches_score(),
            severity = updated.severity(),
            band = %updated.band(),
            "Updated risk"
        );
        Ok(updated)
    }

    async fn delete_risk(&self, id: &str) -> ServiceResult<()> {
        let id = RiskId::new(id);

        self.require_existing(&id).await?;

        let removed = self
            .repository
            .delete_by_id(&id)
            .await
            .map_err(|e| storage_failure("delete_by_id", e))?;
        if !removed {
            return Err(RiskError::not_found(id.as_str()));
        }

        info!(risk_id = %id, "Deleted risk");
        Ok(())
    }

    async fn list_risks(&self, request: RiskQueryRequest) -> ServiceResult<RiskPage> {
        let query = RiskValidator::validate_query(&request)?;

        let page = QueryEngine::new(&self.repository)
            .fetch_page(&query)
            .await
            .map_err(|e| storage_failure("list", e))?;

        debug!(
            total = page.total,
            page = page.page,
            page_size = page.page_size,
            returned = page.items.len(),
            "Listed risks"
        );
        Ok(page)
    }

    async fn export_risks(&self, request: ExportRequest) -> ServiceResult<ExportDocument> {
        let export = RiskValidator::validate_export(&request, self.default_export_format)?;

        let risks = self.fetch_selection(export.filter, export.sort).await?;

        let content = FormatterFactory::create(export.format)
            .format(&risks)
            .map_err(|e| {
                error!(format = %export.format, error = %format!("{:#}", e), "Export rendering failed");
                RiskError::internal()
            })?;

        info!(format = %export.format, records = risks.len(), "Exported risks");
        Ok(ExportDocument::new(
            export.format,
            content,
            Utc::now().date_naive(),
            risks.len(),
        ))
    }

    async fn risk_matrix(&self, request: RiskQueryRequest) -> ServiceResult<RiskMatrix> {
        let (filter, sort) = RiskValidator::validate_selection(&request)?;
        let risks = self.fetch_selection(filter, sort).await?;
        Ok(RiskMatrix::from_risks(&risks))
    }

    async fn risk_summary(&self, request: RiskQueryRequest) -> ServiceResult<RiskSummary> {
        let (filter, sort) = RiskValidator::validate_selection(&request)?;
        let risks = self.fetch_selection(filter, sort).await?;
        Ok(RiskSummary::from_risks(&risks))
    }
}
