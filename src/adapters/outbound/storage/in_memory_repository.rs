use crate::ports::outbound::RiskRepository;
use crate::risk_scoring::domain::{Risk, RiskDraft, RiskFilter, RiskId, RiskPatch, SortSpec};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// InMemoryRiskRepository - process-local storage backed by a concurrent map
///
/// Ids are random v4 UUIDs. Per-record atomicity comes from the map's entry
/// guard: a patch is merged while the shard holding the record is locked, so
/// two updates of the same id never interleave.
#[derive(Clone, Default)]
pub struct InMemoryRiskRepository {
    risks: Arc<DashMap<RiskId, Risk>>,
}

impl InMemoryRiskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with already-persisted records
    pub fn from_risks(risks: impl IntoIterator<Item = Risk>) -> Self {
        let repository = Self::new();
        for risk in risks {
            repository.risks.insert(risk.id().clone(), risk);
        }
        repository
    }

    pub fn len(&self) -> usize {
        self.risks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }

    /// Puts a record back as-is, replacing any record with the same id
    pub(crate) fn restore(&self, risk: Risk) {
        self.risks.insert(risk.id().clone(), risk);
    }

    pub(crate) fn discard(&self, id: &RiskId) {
        self.risks.remove(id);
    }

    /// All records ordered by creation time, then id
    pub fn snapshot(&self) -> Vec<Risk> {
        let mut risks: Vec<Risk> = self.risks.iter().map(|entry| entry.value().clone()).collect();
        risks.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        risks
    }
}

#[async_trait]
impl RiskRepository for InMemoryRiskRepository {
    async fn create(&self, draft: RiskDraft) -> Result<Risk> {
        let id = RiskId::new(Uuid::new_v4().to_string());
        let risk = Risk::from_draft(id.clone(), draft, Utc::now());
        self.risks.insert(id, risk.clone());
        Ok(risk)
    }

    async fn find_by_id(&self, id: &RiskId) -> Result<Option<Risk>> {
        Ok(self.risks.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_by_id(&self, id: &RiskId, patch: &RiskPatch) -> Result<Option<Risk>> {
        Ok(self.risks.get_mut(id).map(|mut entry| {
            entry.apply_patch(patch, Utc::now());
            entry.value().clone()
        }))
    }

    async fn delete_by_id(&self, id: &RiskId) -> Result<bool> {
        Ok(self.risks.remove(id).is_some())
    }

    async fn list(
        &self,
        filter: &RiskFilter,
        sort: &SortSpec,
        skip: usize,
        take: usize,
    ) -> Result<(Vec<Risk>, usize)> {
        let mut matches: Vec<Risk> = self
            .risks
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| sort.compare(a, b));

        let total = matches.len();
        let window = matches.into_iter().skip(skip).take(take).collect();
        Ok((window, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk_scoring::domain::{Band, Rating, SortKey, SortOrder};

    fn draft(title: &str, likelihood: u8, impact: u8) -> RiskDraft {
        RiskDraft::new(
            title.to_string(),
            Rating::new(likelihood).unwrap(),
            Rating::new(impact).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids_and_timestamps() {
        let repo = InMemoryRiskRepository::new();
        let a = repo.create(draft("A", 1, 1)).await.unwrap();
        let b = repo.create(draft("B", 1, 1)).await.unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(a.created_at(), a.updated_at());
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_under_entry_guard() {
        let repo = InMemoryRiskRepository::new();
        let created = repo.create(draft("A", 2, 2)).await.unwrap();

        let patch = RiskPatch::new().with_likelihood(Rating::new(5).unwrap());
        let updated = repo.update_by_id(created.id(), &patch).await.unwrap().unwrap();

        assert_eq!(updated.severity(), 10);
        assert_eq!(updated.band(), Band::High);
        assert_eq!(repo.find_by_id(created.id()).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let repo = InMemoryRiskRepository::new();
        let id = RiskId::new("nope");

        assert!(repo.find_by_id(&id).await.unwrap().is_none());
        assert!(repo.update_by_id(&id, &RiskPatch::new()).await.unwrap().is_none());
        assert!(!repo.delete_by_id(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_windows_after_sorting() {
        let repo = InMemoryRiskRepository::new();
        for (title, l, i) in [("a", 1, 1), ("b", 5, 5), ("c", 3, 3), ("d", 2, 4)] {
            repo.create(draft(title, l, i)).await.unwrap();
        }

        let sort = SortSpec::new(SortKey::Severity, SortOrder::Desc);
        let (window, total) = repo.list(&RiskFilter::new(), &sort, 1, 2).await.unwrap();

        assert_eq!(total, 4);
        let severities: Vec<u16> = window.iter().map(|r| r.severity()).collect();
        assert_eq!(severities, vec![9, 8]);
    }

    #[tokio::test]
    async fn test_list_counts_matches_only() {
        let repo = InMemoryRiskRepository::new();
        repo.create(draft("low", 1, 2)).await.unwrap();
        repo.create(draft("critical", 5, 4)).await.unwrap();

        let filter = RiskFilter::new().with_band(Some(Band::Critical));
        let (window, total) = repo
            .list(&filter, &SortSpec::default(), 0, 10)
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(window[0].title(), "critical");
    }

    #[tokio::test]
    async fn test_concurrent_updates_of_one_record() {
        let repo = InMemoryRiskRepository::new();
        let created = repo.create(draft("A", 1, 1)).await.unwrap();

        let mut handles = Vec::new();
        for value in 1..=5u8 {
            let repo = repo.clone();
            let id = created.id().clone();
            handles.push(tokio::spawn(async move {
                let patch = RiskPatch::new()
                    .with_likelihood(Rating::new(value).unwrap())
                    .with_impact(Rating::new(value).unwrap());
                repo.update_by_id(&id, &patch).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = repo.find_by_id(created.id()).await.unwrap().unwrap();
        let l = stored.likelihood().value();
        assert_eq!(stored.impact().value(), l);
        assert_eq!(stored.severity(), u16::from(l) * u16::from(l));
    }

    #[test]
    fn test_snapshot_is_stable() {
        let repo = InMemoryRiskRepository::new();
        assert!(repo.is_empty());
        assert!(repo.snapshot().is_empty());
    }
}
