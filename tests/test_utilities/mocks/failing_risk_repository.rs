use async_trait::async_trait;
use risk_register::prelude::*;

/// Mock RiskRepository whose storage is unreachable
///
/// With `failing_writes()` reads are served from an in-memory store and only
/// mutations fail.
#[derive(Default)]
pub struct FailingRiskRepository {
    inner: InMemoryRiskRepository,
    reads_work: bool,
}

impl FailingRiskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes(inner: InMemoryRiskRepository) -> Self {
        Self {
            inner,
            reads_work: true,
        }
    }

    fn unavailable<T>(&self) -> Result<T> {
        anyhow::bail!("database unavailable: connection reset by peer (10.0.0.7:5432)")
    }
}

#[async_trait]
impl RiskRepository for FailingRiskRepository {
    async fn create(&self, _draft: RiskDraft) -> Result<Risk> {
        self.unavailable()
    }

    async fn find_by_id(&self, id: &RiskId) -> Result<Option<Risk>> {
        if self.reads_work {
            return self.inner.find_by_id(id).await;
        }
        self.unavailable()
    }

    async fn update_by_id(&self, _id: &RiskId, _patch: &RiskPatch) -> Result<Option<Risk>> {
        self.unavailable()
    }

    async fn delete_by_id(&self, _id: &RiskId) -> Result<bool> {
        self.unavailable()
    }

    async fn list(
        &self,
        filter: &RiskFilter,
        sort: &SortSpec,
        skip: usize,
        take: usize,
    ) -> Result<(Vec<Risk>, usize)> {
        if self.reads_work {
            return self.inner.list(filter, sort, skip, take).await;
        }
        self.unavailable()
    }
}
