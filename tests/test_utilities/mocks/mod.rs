/// Mock implementations for testing
mod failing_risk_repository;
mod recording_risk_repository;

pub use failing_risk_repository::FailingRiskRepository;
pub use recording_risk_repository::{RecordedCall, RecordingRiskRepository};
