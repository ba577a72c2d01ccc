use crate::risk_scoring::domain::Risk;
use serde::Serialize;

/// RiskPage - one page of a listing plus its pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPage {
    pub items: Vec<Risk>,
    /// Number of risks matching the filter, ignoring pagination
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    /// Never 0, even for an empty result
    pub total_pages: usize,
}
