use crate::risk_scoring::domain::Band;

/// SeverityPolicy encodes the scoring rules of the register
///
/// Severity is the product of likelihood and impact, and the band is a
/// fixed thresholding of severity:
///
/// | Severity | Band     |
/// |----------|----------|
/// | ≤ 4      | Low      |
/// | 5 – 9    | Moderate |
/// | 10 – 16  | High     |
/// | ≥ 17     | Critical |
///
/// Both functions are total. Range checks on the inputs belong to validation.
pub struct SeverityPolicy;

impl SeverityPolicy {
    /// Computes the severity score of a (likelihood, impact) pair
    pub fn compute_severity(likelihood: u8, impact: u8) -> u16 {
        u16::from(likelihood) * u16::from(impact)
    }

    /// Classifies a severity score into its band
    pub fn compute_band(severity: u16) -> Band {
        match severity {
            0..=4 => Band::Low,
            5..=9 => Band::Moderate,
            10..=16 => Band::High,
            _ => Band::Critical,
        }
    }

    /// Convenience for callers holding both ratings
    pub fn score(likelihood: u8, impact: u8) -> (u16, Band) {
        let severity = Self::compute_severity(likelihood, impact);
        (severity, Self::compute_band(severity))
    }
}
