//! Insurance needs engine: required coverage, gap analysis and advice

mod needs;
mod gap;
mod advice;

pub use needs::{
    compute_coverage_needs, compute_coverage_needs_with, compute_needs_breakdown, CoverageCategory,
    CoverageNeeds, NeedsBreakdown,
};
pub use gap::{analyze_gaps, held_amount, CategoryGap, CoverageStatus, GapAnalysis};
pub use advice::{recommendations, Recommendation, RiskMetrics};

use serde::Serialize;

use crate::assumptions::NeedsAssumptions;
use crate::household::{CurrentCoverage, HouseholdProfile};

/// Everything the insurance calculator reports for one household
#[derive(Debug, Clone, Serialize)]
pub struct InsuranceReport {
    pub breakdown: NeedsBreakdown,
    pub gaps: GapAnalysis,
    pub metrics: RiskMetrics,
    pub recommendations: Vec<Recommendation>,
}

impl InsuranceReport {
    /// Run needs, gaps, metrics and recommendations in one pass
    pub fn build(
        profile: &HouseholdProfile,
        coverage: &CurrentCoverage,
        assumptions: &NeedsAssumptions,
    ) -> Self {
        let breakdown = compute_needs_breakdown(profile, assumptions);
        let gaps = analyze_gaps(&breakdown.needs, coverage);
        let metrics = RiskMetrics::evaluate(profile, coverage, assumptions);
        let recommendations = recommendations(profile, &breakdown, &gaps, &metrics, assumptions);

        Self {
            breakdown,
            gaps,
            metrics,
            recommendations,
        }
    }

    pub fn needs(&self) -> &CoverageNeeds {
        &self.breakdown.needs
    }
}
