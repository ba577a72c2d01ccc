pub mod band;
pub mod matrix;
pub mod query;
pub mod rating;
pub mod risk;
pub mod risk_patch;
pub mod status;
pub mod summary;

pub use band::Band;
pub use matrix::{MatrixCell, RiskMatrix};
pub use query::{RiskFilter, RiskQuery, SortKey, SortOrder, SortSpec};
pub use rating::Rating;
pub use risk::{Risk, RiskDraft, RiskId};
pub use risk_patch::RiskPatch;
pub use status::Status;
pub use summary::RiskSummary;
