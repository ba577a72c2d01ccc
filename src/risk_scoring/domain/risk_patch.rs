use super::{Rating, Status};

/// Validated partial update of a risk
///
/// Each field is `Some` only when the caller supplied it. Absent fields keep
/// the stored value when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub owner: Option<String>,
    pub likelihood: Option<Rating>,
    pub impact: Option<Rating>,
    pub status: Option<Status>,
}

impl RiskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_likelihood(mut self, likelihood: Rating) -> Self {
        self.likelihood = Some(likelihood);
        self
    }

    pub fn with_impact(mut self, impact: Rating) -> Self {
        self.impact = Some(impact);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether applying this patch requires severity and band to be re-derived
    pub fn touches_score(&self) -> bool {
        self.likelihood.is_some() || self.impact.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
