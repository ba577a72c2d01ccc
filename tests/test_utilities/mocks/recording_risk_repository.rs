use async_trait::async_trait;
use risk_register::prelude::*;
use std::sync::{Arc, Mutex};

/// A storage call as seen by the repository
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Create,
    FindById(String),
    UpdateById(String),
    DeleteById(String),
    List { skip: usize, take: usize },
}

/// Mock RiskRepository that records every call before delegating to an
/// in-memory store
#[derive(Default, Clone)]
pub struct RecordingRiskRepository {
    inner: InMemoryRiskRepository,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingRiskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RiskRepository for RecordingRiskRepository {
    async fn create(&self, draft: RiskDraft) -> Result<Risk> {
        self.record(RecordedCall::Create);
        self.inner.create(draft).await
    }

    async fn find_by_id(&self, id: &RiskId) -> Result<Option<Risk>> {
        self.record(RecordedCall::FindById(id.to_string()));
        self.inner.find_by_id(id).await
    }

    async fn update_by_id(&self, id: &RiskId, patch: &RiskPatch) -> Result<Option<Risk>> {
        self.record(RecordedCall::UpdateById(id.to_string()));
        self.inner.update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: &RiskId) -> Result<bool> {
        self.record(RecordedCall::DeleteById(id.to_string()));
        self.inner.delete_by_id(id).await
    }

    async fn list(
        &self,
        filter: &RiskFilter,
        sort: &SortSpec,
        skip: usize,
        take: usize,
    ) -> Result<(Vec<Risk>, usize)> {
        self.record(RecordedCall::List { skip, take });
        self.inner.list(filter, sort, skip, take).await
    }
}
