use crate::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;

/// RiskQueryRequest - raw listing parameters, as they arrive in a query string
///
/// Every value is kept as text; validation decides defaults, clamping and
/// rejection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskQueryRequest {
    pub band: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub owner: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl RiskQueryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URL query string such as `band=High&search=server%20outage`
    ///
    /// A leading `?` is allowed, `+` decodes to a space and later duplicates
    /// win. Unknown keys are ignored.
    pub fn from_query_string(query: &str) -> Result<Self> {
        let params = parse_query_pairs(query)?;
        Ok(Self::from_params(&params))
    }

    pub(crate) fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).cloned();
        Self {
            band: get("band"),
            status: get("status"),
            search: get("search"),
            category: get("category"),
            owner: get("owner"),
            sort_by: get("sortBy"),
            order: get("order"),
            page: get("page"),
            page_size: get("pageSize"),
        }
    }

    pub fn with_band(mut self, band: impl Into<String>) -> Self {
        self.band = Some(band.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.order = Some(order.into());
        self
    }

    pub fn with_page(mut self, page: impl ToString) -> Self {
        self.page = Some(page.to_string());
        self
    }

    pub fn with_page_size(mut self, page_size: impl ToString) -> Self {
        self.page_size = Some(page_size.to_string());
        self
    }
}

/// ExportRequest - listing filters plus the output format selector
///
/// Pagination fields of the embedded query are ignored on export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRequest {
    pub query: RiskQueryRequest,
    pub format: Option<String>,
}

impl ExportRequest {
    pub fn new(query: RiskQueryRequest, format: Option<String>) -> Self {
        Self { query, format }
    }

    pub fn from_query_string(query: &str) -> Result<Self> {
        let params = parse_query_pairs(query)?;
        Ok(Self {
            query: RiskQueryRequest::from_params(&params),
            format: params.get("format").cloned(),
        })
    }
}

fn parse_query_pairs(query: &str) -> Result<HashMap<String, String>> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = HashMap::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode_component(key)?, decode_component(value)?);
    }

    Ok(params)
}

fn decode_component(component: &str) -> Result<String> {
    let spaced = component.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map_err(|e| {
        anyhow::anyhow!("Invalid query string component '{}': {}", component, e)
    })?;
    Ok(decoded.into_owned())
}
