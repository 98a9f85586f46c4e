//! Risk exposure metrics and coverage recommendations

use serde::{Deserialize, Serialize};

use super::gap::GapAnalysis;
use super::needs::{CoverageCategory, NeedsBreakdown};
use crate::assumptions::NeedsAssumptions;
use crate::household::{CurrentCoverage, HouseholdProfile};

/// Balance sheet and budget ratios of a household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Debt / total assets; None without assets
    pub debt_to_assets: Option<f64>,
    pub debt_heavy: bool,

    /// Liquid / total assets; None without assets
    pub liquidity_share: Option<f64>,

    /// Months of expenses covered by liquid assets; None without expenses
    pub emergency_months: Option<f64>,
    pub emergency_fund_sufficient: bool,

    /// Monthly premium as a percentage of monthly expenses; None without expenses
    pub premium_burden_pct: Option<f64>,
    pub premium_burden_ok: bool,
}

impl RiskMetrics {
    pub fn evaluate(
        profile: &HouseholdProfile,
        coverage: &CurrentCoverage,
        assumptions: &NeedsAssumptions,
    ) -> Self {
        let by_assets = |amount: f64| {
            if profile.total_assets > 0.0 {
                Some(amount / profile.total_assets)
            } else {
                None
            }
        };
        let by_expenses = |amount: f64| {
            if profile.monthly_expenses > 0.0 {
                Some(amount / profile.monthly_expenses)
            } else {
                None
            }
        };

        let emergency_months = by_expenses(profile.liquid_assets);
        let premium_burden_pct = by_expenses(coverage.monthly_premium).map(|r| r * 100.0);

        Self {
            debt_to_assets: by_assets(profile.debt),
            debt_heavy: profile.debt > profile.total_assets * assumptions.max_debt_to_assets,
            liquidity_share: by_assets(profile.liquid_assets),
            emergency_months,
            emergency_fund_sufficient: emergency_months
                .map_or(true, |m| m >= assumptions.min_emergency_months),
            premium_burden_pct,
            // Any premium without expenses to measure it against is excessive
            premium_burden_ok: premium_burden_pct.map_or(coverage.monthly_premium <= 0.0, |p| {
                p <= assumptions.max_premium_burden_pct
            }),
        }
    }
}

/// Advice derived from a gap analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Add term life cover, at least enough for the debt and education
    StrengthenLife {
        outstanding_debt: Option<f64>,
        education_cost: Option<f64>,
    },
    /// Add disability income protection covering living expenses
    AddIncomeProtection { monthly_expenses: f64 },
    /// Add cover for cancer, stroke, heart attack and similar
    AddCriticalIllness,
    /// Look for cheaper premiums keeping the same cover
    ReviewPremiums { max_burden_pct: f64 },
    AllCovered,
    EmergencyFundLow { months: f64, target_months: f64 },
    /// `burden_pct` is None when premiums are paid with no living expenses
    PremiumBurdenHigh { burden_pct: Option<f64>, max_burden_pct: f64 },
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::StrengthenLife { outstanding_debt, education_cost } => {
                write!(f, "Life: strengthen cover with term life insurance, especially for the main earner.")?;
                if let Some(debt) = outstanding_debt {
                    write!(f, " Cover at least the outstanding debt of {:.0}.", debt)?;
                }
                if let Some(cost) = education_cost {
                    write!(f, " Children's education is expected to need about {:.0}.", cost)?;
                }
                Ok(())
            }
            Recommendation::AddIncomeProtection { monthly_expenses } => write!(
                f,
                "Income replacement: consider disability income protection covering at least {:.0} of living expenses per month.",
                monthly_expenses
            ),
            Recommendation::AddCriticalIllness => write!(
                f,
                "Critical illness: review cover for treatment costs and lost income during recovery."
            ),
            Recommendation::ReviewPremiums { max_burden_pct } => write!(
                f,
                "If premiums exceed {:.0}% of living expenses, look for cheaper policies with the same cover.",
                max_burden_pct
            ),
            Recommendation::AllCovered => write!(
                f,
                "All categories are adequately covered. Review again when circumstances change."
            ),
            Recommendation::EmergencyFundLow { months, target_months } => write!(
                f,
                "Emergency fund covers only {:.1} months; hold at least {:.0} months of expenses in liquid assets.",
                months, target_months
            ),
            Recommendation::PremiumBurdenHigh { burden_pct: Some(pct), max_burden_pct } => write!(
                f,
                "Premiums take {:.1}% of living expenses, above {:.0}%; look for cheaper policies with the same cover.",
                pct, max_burden_pct
            ),
            Recommendation::PremiumBurdenHigh { burden_pct: None, .. } => write!(
                f,
                "Premiums are paid with no living expenses recorded; check the budget and look for cheaper policies."
            ),
        }
    }
}

/// Recommendations for every shortfall, or a clean bill of health plus budget warnings
pub fn recommendations(
    profile: &HouseholdProfile,
    breakdown: &NeedsBreakdown,
    gaps: &GapAnalysis,
    metrics: &RiskMetrics,
    assumptions: &NeedsAssumptions,
) -> Vec<Recommendation> {
    let mut advice = Vec::new();

    for gap in gaps.shortfalls() {
        advice.push(match gap.category {
            CoverageCategory::Life => Recommendation::StrengthenLife {
                outstanding_debt: (profile.debt > 0.0).then_some(profile.debt),
                education_cost: (profile.dependents > 0).then_some(breakdown.education_cost),
            },
            CoverageCategory::IncomeReplacement => Recommendation::AddIncomeProtection {
                monthly_expenses: profile.monthly_expenses,
            },
            CoverageCategory::CriticalIllness => Recommendation::AddCriticalIllness,
        });
    }

    if !advice.is_empty() {
        advice.push(Recommendation::ReviewPremiums {
            max_burden_pct: assumptions.max_premium_burden_pct,
        });
        return advice;
    }

    advice.push(Recommendation::AllCovered);
    if let (Some(months), false) = (metrics.emergency_months, metrics.emergency_fund_sufficient) {
        advice.push(Recommendation::EmergencyFundLow {
            months,
            target_months: assumptions.min_emergency_months,
        });
    }
    if !metrics.premium_burden_ok {
        advice.push(Recommendation::PremiumBurdenHigh {
            burden_pct: metrics.premium_burden_pct,
            max_burden_pct: assumptions.max_premium_burden_pct,
        });
    }
    advice
}
