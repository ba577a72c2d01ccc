use super::{Band, Risk, Status};
use serde::Serialize;
use std::cmp::Ordering;

/// Predicates selecting a subset of the register
///
/// Present predicates are combined with AND. Text predicates match
/// case-insensitive substrings; `search` matches title OR description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskFilter {
    band: Option<Band>,
    status: Option<Status>,
    search: Option<String>,
    category: Option<String>,
    owner: Option<String>,
}

impl RiskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_band(mut self, band: Option<Band>) -> Self {
        self.band = band;
        self
    }

    pub fn with_status(mut self, status: Option<Status>) -> Self {
        self.status = status;
        self
    }

    /// Empty terms are treated as "no filter"
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = normalize_term(search);
        self
    }

    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = normalize_term(category);
        self
    }

    pub fn with_owner(mut self, owner: Option<&str>) -> Self {
        self.owner = normalize_term(owner);
        self
    }

    pub fn band(&self) -> Option<Band> {
        self.band
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Lower-cased search term
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, risk: &Risk) -> bool {
        if self.band.is_some_and(|band| risk.band() != band) {
            return false;
        }
        if self.status.is_some_and(|status| risk.status() != status) {
            return false;
        }
        if let Some(term) = &self.search {
            let in_title = contains_insensitive(Some(risk.title()), term);
            let in_description = contains_insensitive(risk.description(), term);
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some(term) = &self.category {
            if !contains_insensitive(risk.category(), term) {
                return false;
            }
        }
        if let Some(term) = &self.owner {
            if !contains_insensitive(risk.owner(), term) {
                return false;
            }
        }
        true
    }
}

fn normalize_term(term: Option<&str>) -> Option<String> {
    term.filter(|t| !t.is_empty()).map(str::to_lowercase)
}

/// `term` is expected to be lower-cased already
fn contains_insensitive(haystack: Option<&str>, term: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(term))
}

/// Field a listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Severity,
    UpdatedAt,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "severity" => Ok(SortKey::Severity),
            "updatedAt" => Ok(SortKey::UpdatedAt),
            _ => Err(format!(
                "Invalid sort key: {}. Expected 'severity' or 'updatedAt'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid order: {}. Expected 'asc' or 'desc'", s)),
        }
    }
}

/// Ordering of a listing
///
/// Records equal on the sort key are ordered by id ascending, whatever the
/// direction, so repeated listings return the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn compare(&self, a: &Risk, b: &Risk) -> Ordering {
        let primary = match self.key {
            SortKey::Severity => a.severity().cmp(&b.severity()),
            SortKey::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
        };
        let primary = match self.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id().cmp(b.id()))
    }
}

/// Validated listing request: what to select, how to order it, which page
#[derive(Debug, Clone, PartialEq)]
pub struct RiskQuery {
    pub filter: RiskFilter,
    pub sort: SortSpec,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}
