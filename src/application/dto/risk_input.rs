use serde::Deserialize;
use serde_json::Value;

/// RiskInput - raw create/update payload as received from a caller
///
/// Fields stay untyped JSON values so validation can coerce them
/// (`"3"` is an acceptable likelihood) and report every bad field at once
/// instead of failing on the first type mismatch. Fields the caller may not
/// set, such as `severity`, `band` or `id`, are not part of the shape and
/// are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RiskInput {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub category: Option<Value>,
    pub owner: Option<Value>,
    pub likelihood: Option<Value>,
    pub impact: Option<Value>,
    pub status: Option<Value>,
}

impl RiskInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON request body
    pub fn from_json(body: &str) -> crate::shared::Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| anyhow::anyhow!("Invalid request body (a JSON object is required): {}", e))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Value::String(title.into()));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Value::String(description.into()));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Value::String(category.into()));
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(Value::String(owner.into()));
        self
    }

    pub fn with_likelihood(mut self, likelihood: impl Into<Value>) -> Self {
        self.likelihood = Some(likelihood.into());
        self
    }

    pub fn with_impact(mut self, impact: impl Into<Value>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(Value::String(status.into()));
        self
    }
}
