use super::{Band, Rating, RiskPatch, Status};
use crate::risk_scoring::policies::SeverityPolicy;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the storage collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskId(String);

impl RiskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RiskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated input for a new risk, with severity and band already derived
#[derive(Debug, Clone, PartialEq)]
pub struct RiskDraft {
    title: String,
    description: Option<String>,
    category: Option<String>,
    owner: Option<String>,
    likelihood: Rating,
    impact: Rating,
    status: Status,
    severity: u16,
    band: Band,
}

impl RiskDraft {
    pub fn new(title: String, likelihood: Rating, impact: Rating) -> Self {
        let (severity, band) = SeverityPolicy::score(likelihood.value(), impact.value());
        Self {
            title,
            description: None,
            category: None,
            owner: None,
            likelihood,
            impact,
            status: Status::default(),
            severity,
            band,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn likelihood(&self) -> Rating {
        self.likelihood
    }

    pub fn impact(&self) -> Rating {
        self.impact
    }

    pub fn severity(&self) -> u16 {
        self.severity
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// A recorded organizational risk
///
/// `severity` and `band` have no setters: they are derived from the ratings
/// on construction, on every patch touching a rating, and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRisk")]
pub struct Risk {
    id: RiskId,
    title: String,
    description: Option<String>,
    category: Option<String>,
    owner: Option<String>,
    likelihood: Rating,
    impact: Rating,
    severity: u16,
    band: Band,
    status: Status,
    #[serde(serialize_with = "serialize_millis")]
    created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_millis")]
    updated_at: DateTime<Utc>,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`
fn serialize_millis<S: serde::Serializer>(
    at: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl Risk {
    /// Materializes a draft under the identifier and time chosen by storage
    pub fn from_draft(id: RiskId, draft: RiskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            owner: draft.owner,
            likelihood: draft.likelihood,
            impact: draft.impact,
            severity: draft.severity,
            band: draft.band,
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges a patch onto this record and refreshes `updated_at`
    ///
    /// Severity and band are recomputed from the merged ratings whenever the
    /// patch carries likelihood or impact.
    pub fn apply_patch(&mut self, patch: &RiskPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(category) = &patch.category {
            self.category = Some(category.clone());
        }
        if let Some(owner) = &patch.owner {
            self.owner = Some(owner.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if patch.touches_score() {
            self.likelihood = patch.likelihood.unwrap_or(self.likelihood);
            self.impact = patch.impact.unwrap_or(self.impact);
            let (severity, band) =
                SeverityPolicy::score(self.likelihood.value(), self.impact.value());
            self.severity = severity;
            self.band = band;
        }
        self.updated_at = now;
    }

    pub fn id(&self) -> &RiskId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn likelihood(&self) -> Rating {
        self.likelihood
    }

    pub fn impact(&self) -> Rating {
        self.impact
    }

    pub fn severity(&self) -> u16 {
        self.severity
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Persisted shape of a risk; stored severity and band are discarded
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRisk {
    id: RiskId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    owner: Option<String>,
    likelihood: Rating,
    impact: Rating,
    #[serde(default)]
    status: Status,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoredRisk> for Risk {
    fn from(stored: StoredRisk) -> Self {
        let (severity, band) =
            SeverityPolicy::score(stored.likelihood.value(), stored.impact.value());
        Self {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            category: stored.category,
            owner: stored.owner,
            likelihood: stored.likelihood,
            impact: stored.impact,
            severity,
            band,
            status: stored.status,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}
