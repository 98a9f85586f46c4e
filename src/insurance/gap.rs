//! Coverage gap analysis: required versus currently held coverage

use serde::{Deserialize, Serialize};

use super::needs::{CoverageCategory, CoverageNeeds};
use crate::household::CurrentCoverage;
use crate::ratio::pct_of;

/// Whether a category is adequately covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageStatus {
    /// Need exceeds what is held
    Shortfall,
    /// Held coverage meets or exceeds the need
    Covered,
}

/// Gap for a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGap {
    pub category: CoverageCategory,
    pub need: f64,
    pub held: f64,
    /// need - held; negative is a surplus
    pub gap: f64,
    /// gap as a percentage of need; None when the need is zero
    pub gap_pct: Option<f64>,
    pub status: CoverageStatus,
}

/// Gap analysis across all categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    /// One entry per category in fixed category order
    pub categories: Vec<CategoryGap>,
    pub total_needed: f64,
    pub total_held: f64,
    pub total_gap: f64,
    pub total_gap_pct: Option<f64>,
}

impl GapAnalysis {
    /// Categories with a shortfall
    pub fn shortfalls(&self) -> impl Iterator<Item = &CategoryGap> {
        self.categories
            .iter()
            .filter(|g| g.status == CoverageStatus::Shortfall)
    }

    pub fn has_shortfall(&self) -> bool {
        self.shortfalls().next().is_some()
    }

    pub fn get(&self, category: CoverageCategory) -> Option<&CategoryGap> {
        self.categories.iter().find(|g| g.category == category)
    }
}

/// Coverage held for a category, on the same basis as the need.
/// Disability cover is held as a monthly benefit and compared annually.
pub fn held_amount(coverage: &CurrentCoverage, category: CoverageCategory) -> f64 {
    match category {
        CoverageCategory::Life => coverage.life,
        CoverageCategory::IncomeReplacement => coverage.disability_annual(),
        CoverageCategory::CriticalIllness => coverage.critical_illness,
    }
}

/// Compare required coverage with what the household holds
pub fn analyze_gaps(needs: &CoverageNeeds, coverage: &CurrentCoverage) -> GapAnalysis {
    let categories: Vec<CategoryGap> = needs
        .iter()
        .map(|(category, need)| {
            let held = held_amount(coverage, category);
            let gap = need - held;
            CategoryGap {
                category,
                need,
                held,
                gap,
                gap_pct: pct_of(gap, need),
                status: if gap > 0.0 {
                    CoverageStatus::Shortfall
                } else {
                    CoverageStatus::Covered
                },
            }
        })
        .collect();

    let total_needed: f64 = categories.iter().map(|g| g.need).sum();
    let total_held: f64 = categories.iter().map(|g| g.held).sum();
    let total_gap = total_needed - total_held;

    GapAnalysis {
        categories,
        total_needed,
        total_held,
        total_gap,
        total_gap_pct: pct_of(total_gap, total_needed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn needs() -> CoverageNeeds {
        CoverageNeeds {
            life: 1_305_000_000.0,
            income_replacement: 431_460_000.0,
            critical_illness: 212_500_000.0,
        }
    }

    fn coverage() -> CurrentCoverage {
        CurrentCoverage {
            life: 100_000_000.0,
            disability_monthly: 1_000_000.0,
            critical_illness: 50_000_000.0,
            monthly_premium: 300_000.0,
        }
    }

    #[test]
    fn test_gap_per_category() {
        let analysis = analyze_gaps(&needs(), &coverage());
        assert_eq!(analysis.categories.len(), 3);

        let life = analysis.get(CoverageCategory::Life).unwrap();
        assert!((life.gap - 1_205_000_000.0).abs() < 1e-3);
        assert_eq!(life.status, CoverageStatus::Shortfall);

        // Monthly disability benefit is compared as an annual figure
        let income = analysis.get(CoverageCategory::IncomeReplacement).unwrap();
        assert!((income.held - 12_000_000.0).abs() < 1e-9);
        assert!((income.gap - 419_460_000.0).abs() < 1e-3);

        assert!((analysis.total_held - 162_000_000.0).abs() < 1e-6);
        assert!((analysis.total_gap - (analysis.total_needed - 162_000_000.0)).abs() < 1e-6);
        assert_eq!(analysis.shortfalls().count(), 3);
    }

    #[test]
    fn test_surplus_is_negative_gap() {
        let zero_needs = CoverageNeeds {
            life: 0.0,
            income_replacement: 0.0,
            critical_illness: 10_000_000.0,
        };
        let analysis = analyze_gaps(&zero_needs, &coverage());

        let life = analysis.get(CoverageCategory::Life).unwrap();
        assert!(life.gap < 0.0);
        assert_eq!(life.status, CoverageStatus::Covered);
        assert_eq!(life.gap_pct, None);

        let ci = analysis.get(CoverageCategory::CriticalIllness).unwrap();
        assert_eq!(ci.gap_pct, Some(-400.0));
        assert!(!analysis.has_shortfall());
    }
}
