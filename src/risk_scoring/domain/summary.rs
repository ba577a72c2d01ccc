use super::{Band, Risk, Status};
use serde::Serialize;

/// Headline counts of a set of risks, per band and per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
    pub open: usize,
    pub monitoring: usize,
    pub closed: usize,
}

impl RiskSummary {
    pub fn from_risks(risks: &[Risk]) -> Self {
        risks.iter().fold(Self::default(), |mut summary, risk| {
            summary.total += 1;
            match risk.band() {
                Band::Critical => summary.critical += 1,
                Band::High => summary.high += 1,
                Band::Moderate => summary.moderate += 1,
                Band::Low => summary.low += 1,
            }
            match risk.status() {
                Status::Open => summary.open += 1,
                Status::Monitoring => summary.monitoring += 1,
                Status::Closed => summary.closed += 1,
            }
            summary
        })
    }

    pub fn count_for_band(&self, band: Band) -> usize {
        match band {
            Band::Critical => self.critical,
            Band::High => self.high,
            Band::Moderate => self.moderate,
            Band::Low => self.low,
        }
    }

    pub fn count_for_status(&self, status: Status) -> usize {
        match status {
            Status::Open => self.open,
            Status::Monitoring => self.monitoring,
            Status::Closed => self.closed,
        }
    }
}
