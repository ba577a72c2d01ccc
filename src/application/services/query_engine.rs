use crate::application::dto::RiskPage;
use crate::ports::outbound::RiskRepository;
use crate::risk_scoring::domain::{Risk, RiskFilter, RiskQuery, SortSpec};
use crate::shared::Result;

/// A storage read: what to select, in which order, which window
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub filter: RiskFilter,
    pub sort: SortSpec,
    pub skip: usize,
    pub take: usize,
}

impl QueryPlan {
    /// Plan for page `query.page` (1-based) of `query.page_size` records
    pub fn for_page(query: &RiskQuery) -> Self {
        Self {
            filter: query.filter.clone(),
            sort: query.sort,
            skip: query.page.saturating_sub(1).saturating_mul(query.page_size),
            take: query.page_size,
        }
    }

    /// Plan for a single window of `bulk_size` records starting at the first match
    pub fn for_bulk(filter: RiskFilter, sort: SortSpec, bulk_size: usize) -> Self {
        Self {
            filter,
            sort,
            skip: 0,
            take: bulk_size,
        }
    }
}

/// `max(1, ceil(total / page_size))`
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// QueryEngine - runs filtered, sorted and paginated reads against storage
pub struct QueryEngine<'a, R: ?Sized> {
    repository: &'a R,
}

impl<'a, R: RiskRepository + ?Sized> QueryEngine<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// Fetches one page together with its pagination metadata
    pub async fn fetch_page(&self, query: &RiskQuery) -> Result<RiskPage> {
        let plan = QueryPlan::for_page(query);
        let (items, total) = self.execute(&plan).await?;

        Ok(RiskPage {
            items,
            total,
            page: query.page,
            page_size: query.page_size,
            total_pages: total_pages(total, query.page_size),
        })
    }

    /// Fetches up to `bulk_size` matches in one window
    ///
    /// Returns the records and the full match count, which exceeds the number
    /// of records when the bulk size truncated the result.
    pub async fn fetch_bulk(
        &self,
        filter: RiskFilter,
        sort: SortSpec,
        bulk_size: usize,
    ) -> Result<(Vec<Risk>, usize)> {
        let plan = QueryPlan::for_bulk(filter, sort, bulk_size);
        self.execute(&plan).await
    }

    async fn execute(&self, plan: &QueryPlan) -> Result<(Vec<Risk>, usize)> {
        self.repository
            .list(&plan.filter, &plan.sort, plan.skip, plan.take)
            .await
    }
}
