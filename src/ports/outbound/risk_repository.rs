use crate::risk_scoring::domain::{Risk, RiskDraft, RiskFilter, RiskId, RiskPatch, SortSpec};
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// RiskRepository port - the storage collaborator of the register
///
/// The repository owns durability and identity: it assigns ids and
/// timestamps on creation and guarantees id uniqueness. The core never
/// reads-then-writes across records, so the only atomicity required is per
/// record in [`RiskRepository::update_by_id`].
///
/// # Async Support
/// Implementations must be `Send + Sync` so one instance can serve any
/// number of concurrent requests.
#[async_trait]
pub trait RiskRepository: Send + Sync {
    /// Persists a new risk, assigning its id, `createdAt` and `updatedAt`
    async fn create(&self, draft: RiskDraft) -> Result<Risk>;

    /// Looks a risk up by id
    async fn find_by_id(&self, id: &RiskId) -> Result<Option<Risk>>;

    /// Applies a patch to the stored record as one atomic step
    ///
    /// The merge must run against the current stored value (see
    /// [`Risk::apply_patch`]) while no other write to the same id can
    /// interleave. Returns `None` if the id does not exist.
    async fn update_by_id(&self, id: &RiskId, patch: &RiskPatch) -> Result<Option<Risk>>;

    /// Removes a risk. Returns `false` if the id does not exist.
    async fn delete_by_id(&self, id: &RiskId) -> Result<bool>;

    /// Returns the `[skip, skip + take)` window of the matching risks in
    /// `sort` order, together with the number of matches ignoring the window
    async fn list(
        &self,
        filter: &RiskFilter,
        sort: &SortSpec,
        skip: usize,
        take: usize,
    ) -> Result<(Vec<Risk>, usize)>;
}

#[async_trait]
impl<R: RiskRepository + ?Sized> RiskRepository for Arc<R> {
    async fn create(&self, draft: RiskDraft) -> Result<Risk> {
        (**self).create(draft).await
    }

    async fn find_by_id(&self, id: &RiskId) -> Result<Option<Risk>> {
        (**self).find_by_id(id).await
    }

    async fn update_by_id(&self, id: &RiskId, patch: &RiskPatch) -> Result<Option<Risk>> {
        (**self).update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: &RiskId) -> Result<bool> {
        (**self).delete_by_id(id).await
    }

    async fn list(
        &self,
        filter: &RiskFilter,
        sort: &SortSpec,
        skip: usize,
        take: usize,
    ) -> Result<(Vec<Risk>, usize)> {
        (**self).list(filter, sort, skip, take).await
    }
}
