/// Application services shared by the use cases: input validation and
/// query execution
mod query_engine;
mod risk_validator;

pub use query_engine::{total_pages, QueryEngine, QueryPlan};
pub use risk_validator::{
    ExportQuery, RiskValidator, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MAX_TITLE_LENGTH,
    MIN_PAGE_SIZE,
};
