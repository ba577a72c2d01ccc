use super::{Band, Rating, Risk, RiskId};
use crate::risk_scoring::policies::SeverityPolicy;
use serde::Serialize;

/// One (likelihood, impact) cell of the risk matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCell {
    pub likelihood: Rating,
    pub impact: Rating,
    pub severity: u16,
    pub band: Band,
    pub count: usize,
    pub risk_ids: Vec<RiskId>,
}

/// 5×5 likelihood/impact grid aggregated from a set of risks
///
/// Rows run from likelihood 5 down to 1 and columns from impact 1 up to 5,
/// the way the matrix is read on screen. Cell bands come from the scoring
/// policy, never from the risks themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMatrix {
    rows: Vec<Vec<MatrixCell>>,
}

impl RiskMatrix {
    pub fn from_risks(risks: &[Risk]) -> Self {
        let rows = Rating::all()
            .rev()
            .map(|likelihood| {
                Rating::all()
                    .map(|impact| {
                        let (severity, band) =
                            SeverityPolicy::score(likelihood.value(), impact.value());
                        let risk_ids: Vec<RiskId> = risks
                            .iter()
                            .filter(|r| r.likelihood() == likelihood && r.impact() == impact)
                            .map(|r| r.id().clone())
                            .collect();
                        MatrixCell {
                            likelihood,
                            impact,
                            severity,
                            band,
                            count: risk_ids.len(),
                            risk_ids,
                        }
                    })
                    .collect()
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<MatrixCell>] {
        &self.rows
    }

    pub fn cell(&self, likelihood: Rating, impact: Rating) -> Option<&MatrixCell> {
        self.rows
            .iter()
            .flatten()
            .find(|c| c.likelihood == likelihood && c.impact == impact)
    }

    pub fn total(&self) -> usize {
        self.rows.iter().flatten().map(|c| c.count).sum()
    }
}
