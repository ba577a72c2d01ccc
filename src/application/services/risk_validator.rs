use crate::application::dto::{ExportFormat, ExportRequest, RiskInput, RiskQueryRequest};
use crate::risk_scoring::domain::{
    Band, Rating, RiskDraft, RiskFilter, RiskPatch, RiskQuery, SortKey, SortOrder, SortSpec,
    Status,
};
use crate::shared::{FieldViolation, RiskError, ServiceResult};
use serde_json::Value;
use std::str::FromStr;

/// Maximum title length, in characters
pub const MAX_TITLE_LENGTH: usize = 100;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MIN_PAGE_SIZE: usize = 1;
pub const MAX_PAGE_SIZE: usize = 100;

/// Filter value meaning "do not filter on this field"
const ALL_SENTINEL: &str = "all";

/// Validated export parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ExportQuery {
    pub filter: RiskFilter,
    pub sort: SortSpec,
    pub format: ExportFormat,
}

/// RiskValidator - schema rules for create, update and query inputs
///
/// Every check runs before anything reaches storage, and every violated field
/// is collected so a caller can fix its input in one round trip.
///
/// Page size is the one value that is never rejected: out-of-range or
/// non-numeric sizes are clamped into `[1, 100]` (or defaulted), while any
/// other problem in the same query still fails.
pub struct RiskValidator;

impl RiskValidator {
    /// Validates a create payload into a draft with severity and band derived
    pub fn validate_create(input: &RiskInput) -> ServiceResult<RiskDraft> {
        let mut violations = Vec::new();

        let title = match &input.title {
            Some(value) => record(&mut violations, "title", parse_title(value)),
            None => {
                violations.push(FieldViolation::new("title", "is required"));
                None
            }
        };
        let likelihood = required_rating(&mut violations, "likelihood", input.likelihood.as_ref());
        let impact = required_rating(&mut violations, "impact", input.impact.as_ref());
        let description = optional_text(&mut violations, "description", input.description.as_ref());
        let category = optional_text(&mut violations, "category", input.category.as_ref());
        let owner = optional_text(&mut violations, "owner", input.owner.as_ref());
        let status = input
            .status
            .as_ref()
            .and_then(|v| record(&mut violations, "status", parse_status(v)))
            .unwrap_or_default();

        match (title, likelihood, impact) {
            (Some(title), Some(likelihood), Some(impact)) if violations.is_empty() => {
                Ok(RiskDraft::new(title, likelihood, impact)
                    .with_description(description)
                    .with_category(category)
                    .with_owner(owner)
                    .with_status(status))
            }
            _ => Err(RiskError::validation(violations)),
        }
    }

    /// Validates a partial update; only supplied fields end up in the patch
    pub fn validate_update(input: &RiskInput) -> ServiceResult<RiskPatch> {
        let mut violations = Vec::new();

        let patch = RiskPatch {
            title: input
                .title
                .as_ref()
                .and_then(|v| record(&mut violations, "title", parse_title(v))),
            description: optional_text(&mut violations, "description", input.description.as_ref()),
            category: optional_text(&mut violations, "category", input.category.as_ref()),
            owner: optional_text(&mut violations, "owner", input.owner.as_ref()),
            likelihood: input
                .likelihood
                .as_ref()
                .and_then(|v| record(&mut violations, "likelihood", coerce_rating(v))),
            impact: input
                .impact
                .as_ref()
                .and_then(|v| record(&mut violations, "impact", coerce_rating(v))),
            status: input
                .status
                .as_ref()
                .and_then(|v| record(&mut violations, "status", parse_status(v))),
        };

        if violations.is_empty() {
            Ok(patch)
        } else {
            Err(RiskError::validation(violations))
        }
    }

    /// Validates listing parameters, applying defaults and the page-size clamp
    pub fn validate_query(request: &RiskQueryRequest) -> ServiceResult<RiskQuery> {
        let mut violations = Vec::new();

        let (filter, sort) = filter_and_sort(&mut violations, request);
        let page = match request.page.as_deref() {
            None => DEFAULT_PAGE,
            Some(raw) => record(&mut violations, "page", parse_page(raw)).unwrap_or(DEFAULT_PAGE),
        };
        let page_size = Self::clamp_page_size(request.page_size.as_deref());

        if violations.is_empty() {
            Ok(RiskQuery {
                filter,
                sort,
                page,
                page_size,
            })
        } else {
            Err(RiskError::validation(violations))
        }
    }

    /// Validates only the filter and sort fields of a query
    ///
    /// Used by whole-collection reads (matrix, summary) where pagination
    /// fields have no meaning.
    pub fn validate_selection(
        request: &RiskQueryRequest,
    ) -> ServiceResult<(RiskFilter, SortSpec)> {
        let mut violations = Vec::new();
        let selection = filter_and_sort(&mut violations, request);

        if violations.is_empty() {
            Ok(selection)
        } else {
            Err(RiskError::validation(violations))
        }
    }

    /// Validates export parameters; `page` and `pageSize` are ignored
    pub fn validate_export(
        request: &ExportRequest,
        default_format: ExportFormat,
    ) -> ServiceResult<ExportQuery> {
        let mut violations = Vec::new();

        let (filter, sort) = filter_and_sort(&mut violations, &request.query);
        let format = match request.format.as_deref() {
            None => default_format,
            Some(raw) => record(&mut violations, "format", ExportFormat::from_str(raw))
                .unwrap_or(default_format),
        };

        if violations.is_empty() {
            Ok(ExportQuery {
                filter,
                sort,
                format,
            })
        } else {
            Err(RiskError::validation(violations))
        }
    }

    /// Clamps a raw page size into `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`
    ///
    /// Fractions are truncated and blank input counts as 0. Absent or
    /// non-numeric input yields [`DEFAULT_PAGE_SIZE`].
    pub fn clamp_page_size(raw: Option<&str>) -> usize {
        match raw.and_then(parse_number) {
            Some(n) if n.is_finite() => {
                let n = n.trunc().clamp(MIN_PAGE_SIZE as f64, MAX_PAGE_SIZE as f64);
                n as usize
            }
            _ => DEFAULT_PAGE_SIZE,
        }
    }
}

fn filter_and_sort(
    violations: &mut Vec<FieldViolation>,
    request: &RiskQueryRequest,
) -> (RiskFilter, SortSpec) {
    let band = request
        .band
        .as_deref()
        .filter(|b| *b != ALL_SENTINEL)
        .and_then(|b| record(violations, "band", Band::from_str(b)));
    let status = request
        .status
        .as_deref()
        .filter(|s| *s != ALL_SENTINEL)
        .and_then(|s| record(violations, "status", Status::from_str(s)));
    let key = request
        .sort_by
        .as_deref()
        .and_then(|k| record(violations, "sortBy", SortKey::from_str(k)))
        .unwrap_or_default();
    let order = request
        .order
        .as_deref()
        .and_then(|o| record(violations, "order", SortOrder::from_str(o)))
        .unwrap_or_default();

    let filter = RiskFilter::new()
        .with_band(band)
        .with_status(status)
        .with_search(request.search.as_deref())
        .with_category(request.category.as_deref())
        .with_owner(request.owner.as_deref());

    (filter, SortSpec::new(key, order))
}

/// Pushes the error, if any, onto `violations` and returns the value
fn record<T, E: ToString>(
    violations: &mut Vec<FieldViolation>,
    field: &str,
    result: Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            violations.push(FieldViolation::new(field, e.to_string()));
            None
        }
    }
}

fn required_rating(
    violations: &mut Vec<FieldViolation>,
    field: &str,
    value: Option<&Value>,
) -> Option<Rating> {
    match value {
        Some(value) => record(violations, field, coerce_rating(value)),
        None => {
            violations.push(FieldViolation::new(field, "is required"));
            None
        }
    }
}

fn optional_text(
    violations: &mut Vec<FieldViolation>,
    field: &str,
    value: Option<&Value>,
) -> Option<String> {
    value.and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        _ => {
            violations.push(FieldViolation::new(field, "expected a string"));
            None
        }
    })
}

fn parse_title(value: &Value) -> Result<String, String> {
    let Value::String(title) = value else {
        return Err("expected a string".to_string());
    };
    if title.is_empty() {
        return Err("is required".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!("must be at most {} characters", MAX_TITLE_LENGTH));
    }
    Ok(title.clone())
}

fn parse_status(value: &Value) -> Result<Status, String> {
    match value {
        Value::String(s) => Status::from_str(s),
        _ => Err("expected one of Open, Monitoring, Closed".to_string()),
    }
}

/// Accepts JSON numbers and numeric strings with an integral value in 1..=5
fn coerce_rating(value: &Value) -> Result<Rating, String> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() && n.fract() == 0.0 => {
            let in_u8 = (0.0..=f64::from(u8::MAX)).contains(&n);
            let candidate = if in_u8 { n as u8 } else { 0 };
            Rating::new(candidate).map_err(|e| e.to_string())
        }
        Some(n) if n.is_finite() => Err("must be an integer".to_string()),
        _ => Err("expected a number".to_string()),
    }
}

fn parse_page(raw: &str) -> Result<usize, String> {
    match parse_number(raw) {
        Some(n) if n.is_finite() && n.fract() == 0.0 && n >= 1.0 => Ok(n as usize),
        Some(n) if n.is_finite() && n.fract() == 0.0 => {
            Err("must be greater than or equal to 1".to_string())
        }
        Some(n) if n.is_finite() => Err("must be an integer".to_string()),
        _ => Err("expected a number".to_string()),
    }
}

/// Numeric reading of text input; blank text reads as 0
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_input() -> RiskInput {
        RiskInput::new()
            .with_title("Server outage")
            .with_likelihood(3)
            .with_impact(4)
    }

    fn fields(err: &RiskError) -> Vec<&str> {
        err.violations().iter().map(|v| v.field.as_str()).collect()
    }

    // Create

    #[test]
    fn test_create_valid_derives_score_and_default_status() {
        let draft = RiskValidator::validate_create(&valid_input()).unwrap();
        assert_eq!(draft.title(), "Server outage");
        assert_eq!(draft.severity(), 12);
        assert_eq!(draft.band(), Band::High);
        assert_eq!(draft.status(), Status::Open);
    }

    #[test]
    fn test_create_coerces_numeric_strings() {
        let input = valid_input().with_likelihood("5").with_impact(" 2 ");
        let draft = RiskValidator::validate_create(&input).unwrap();
        assert_eq!(draft.likelihood().value(), 5);
        assert_eq!(draft.impact().value(), 2);
    }

    #[test]
    fn test_create_accepts_integral_floats() {
        let input = valid_input().with_likelihood(json!(4.0));
        assert!(RiskValidator::validate_create(&input).is_ok());
    }

    #[test]
    fn test_create_reports_every_violation() {
        let input = RiskInput::new()
            .with_likelihood(0)
            .with_impact("seven")
            .with_status("Archived");
        let err = RiskValidator::validate_create(&input).unwrap_err();
        assert_eq!(fields(&err), vec!["title", "likelihood", "impact", "status"]);
    }

    #[test]
    fn test_create_missing_ratings_are_required() {
        let input = RiskInput::new().with_title("No ratings");
        let err = RiskValidator::validate_create(&input).unwrap_err();
        assert_eq!(fields(&err), vec!["likelihood", "impact"]);
        assert!(err.violations().iter().all(|v| v.message == "is required"));
    }

    #[test]
    fn test_create_rejects_out_of_range_ratings() {
        for bad in [json!(0), json!(6), json!(-1), json!(300), json!("9")] {
            let input = valid_input().with_impact(bad.clone());
            let err = RiskValidator::validate_create(&input).unwrap_err();
            assert_eq!(fields(&err), vec!["impact"], "value {} must be rejected", bad);
            assert_eq!(err.violations()[0].message, "must be an integer between 1 and 5");
        }
    }

    #[test]
    fn test_create_rejects_fractional_rating() {
        let input = valid_input().with_likelihood(json!(2.5));
        let err = RiskValidator::validate_create(&input).unwrap_err();
        assert_eq!(err.violations()[0].message, "must be an integer");
    }

    #[test]
    fn test_create_rejects_non_numeric_rating_types() {
        let input = valid_input().with_likelihood(json!(true));
        let err = RiskValidator::validate_create(&input).unwrap_err();
        assert_eq!(err.violations()[0].message, "expected a number");
    }

    #[test]
    fn test_title_length_limit() {
        let exactly = "a".repeat(MAX_TITLE_LENGTH);
        assert!(RiskValidator::validate_create(&valid_input().with_title(exactly)).is_ok());

        let too_long = "a".repeat(MAX_TITLE_LENGTH + 1);
        let err = RiskValidator::validate_create(&valid_input().with_title(too_long)).unwrap_err();
        assert_eq!(fields(&err), vec!["title"]);
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_TITLE_LENGTH);
        assert!(RiskValidator::validate_create(&valid_input().with_title(accented)).is_ok());
    }

    #[test]
    fn test_only_empty_title_rejected() {
        let draft = RiskValidator::validate_create(&valid_input().with_title("   ")).unwrap();
        assert_eq!(draft.title(), "   ");

        let err = RiskValidator::validate_create(&valid_input().with_title("")).unwrap_err();
        assert_eq!(fields(&err), vec!["title"]);
    }

    #[test]
    fn test_create_accepts_optional_text_fields() {
        let input = valid_input()
            .with_description("Primary DB host fails")
            .with_category("Infrastructure")
            .with_owner("Ops")
            .with_status("Monitoring");
        let draft = RiskValidator::validate_create(&input).unwrap();
        assert_eq!(draft.status(), Status::Monitoring);
    }

    #[test]
    fn test_create_rejects_non_string_description() {
        let mut input = valid_input();
        input.description = Some(json!(42));
        let err = RiskValidator::validate_create(&input).unwrap_err();
        assert_eq!(fields(&err), vec!["description"]);
    }

    // Update

    #[test]
    fn test_update_empty_input_is_empty_patch() {
        let patch = RiskValidator::validate_update(&RiskInput::new()).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_update_only_supplied_fields() {
        let patch = RiskValidator::validate_update(&RiskInput::new().with_impact("5")).unwrap();
        assert_eq!(patch.impact, Some(Rating::new(5).unwrap()));
        assert!(patch.likelihood.is_none());
        assert!(patch.title.is_none());
        assert!(patch.touches_score());
    }

    #[test]
    fn test_update_applies_same_field_rules() {
        let input = RiskInput::new()
            .with_title("")
            .with_likelihood(9)
            .with_status("open");
        let err = RiskValidator::validate_update(&input).unwrap_err();
        assert_eq!(fields(&err), vec!["title", "likelihood", "status"]);
    }

    // Query

    #[test]
    fn test_query_defaults() {
        let query = RiskValidator::validate_query(&RiskQueryRequest::new()).unwrap();
        assert!(query.filter.is_empty());
        assert_eq!(query.sort, SortSpec::new(SortKey::Severity, SortOrder::Desc));
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
    }

    #[test]
    fn test_query_band_all_means_no_filter() {
        let all = RiskValidator::validate_query(&RiskQueryRequest::new().with_band("all")).unwrap();
        let none = RiskValidator::validate_query(&RiskQueryRequest::new()).unwrap();
        assert_eq!(all, none);
    }

    #[test]
    fn test_query_status_all_means_no_filter() {
        let query =
            RiskValidator::validate_query(&RiskQueryRequest::new().with_status("all")).unwrap();
        assert!(query.filter.status().is_none());
    }

    #[test]
    fn test_query_rejects_unknown_band_and_sort() {
        let request = RiskQueryRequest::new()
            .with_band("Severe")
            .with_sort("title", "up");
        let err = RiskValidator::validate_query(&request).unwrap_err();
        assert_eq!(fields(&err), vec!["band", "sortBy", "order"]);
    }

    #[test]
    fn test_page_size_clamped_not_rejected() {
        let big = RiskValidator::validate_query(&RiskQueryRequest::new().with_page_size(500)).unwrap();
        assert_eq!(big.page_size, 100);

        let zero = RiskValidator::validate_query(&RiskQueryRequest::new().with_page_size(0)).unwrap();
        assert_eq!(zero.page_size, 1);
    }

    #[test]
    fn test_clamp_page_size_edge_inputs() {
        assert_eq!(RiskValidator::clamp_page_size(None), 20);
        assert_eq!(RiskValidator::clamp_page_size(Some("abc")), 20);
        assert_eq!(RiskValidator::clamp_page_size(Some("inf")), 20);
        assert_eq!(RiskValidator::clamp_page_size(Some("-5")), 1);
        assert_eq!(RiskValidator::clamp_page_size(Some("")), 1);
        assert_eq!(RiskValidator::clamp_page_size(Some("12.9")), 12);
        assert_eq!(RiskValidator::clamp_page_size(Some("1e3")), 100);
        assert_eq!(RiskValidator::clamp_page_size(Some("100")), 100);
    }

    #[test]
    fn test_page_size_clamp_does_not_hide_other_errors() {
        let request = RiskQueryRequest::new().with_page_size(500).with_band("Bogus");
        let err = RiskValidator::validate_query(&request).unwrap_err();
        assert_eq!(fields(&err), vec!["band"]);
    }

    #[test]
    fn test_query_page_validation() {
        let ok = RiskValidator::validate_query(&RiskQueryRequest::new().with_page("3")).unwrap();
        assert_eq!(ok.page, 3);

        for bad in ["0", "-1", "1.5", "abc", ""] {
            let err =
                RiskValidator::validate_query(&RiskQueryRequest::new().with_page(bad)).unwrap_err();
            assert_eq!(fields(&err), vec!["page"], "page {:?} must be rejected", bad);
        }
    }

    #[test]
    fn test_query_search_is_lowercased() {
        let query =
            RiskValidator::validate_query(&RiskQueryRequest::new().with_search("OutAge")).unwrap();
        assert_eq!(query.filter.search(), Some("outage"));
    }

    // Export

    #[test]
    fn test_export_default_format() {
        let export =
            RiskValidator::validate_export(&ExportRequest::default(), ExportFormat::Json).unwrap();
        assert_eq!(export.format, ExportFormat::Json);
    }

    #[test]
    fn test_export_ignores_pagination() {
        let request = ExportRequest::new(
            RiskQueryRequest::new().with_page("not-a-number").with_page_size(0),
            Some("csv".to_string()),
        );
        let export = RiskValidator::validate_export(&request, ExportFormat::Json).unwrap();
        assert_eq!(export.format, ExportFormat::Csv);
    }

    #[test]
    fn test_export_rejects_unknown_format() {
        let request = ExportRequest::new(RiskQueryRequest::new(), Some("xlsx".to_string()));
        let err = RiskValidator::validate_export(&request, ExportFormat::Json).unwrap_err();
        assert_eq!(fields(&err), vec!["format"]);
    }
}
