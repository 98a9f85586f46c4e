//! Required coverage per insurance category

use serde::{Deserialize, Serialize};

use crate::assumptions::NeedsAssumptions;
use crate::household::HouseholdProfile;

/// Insurance category; the set is fixed and every result carries all three
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageCategory {
    /// Death benefit
    Life,
    /// Disability income protection, annual amount
    IncomeReplacement,
    /// Lump sum on critical illness diagnosis
    CriticalIllness,
}

impl CoverageCategory {
    pub const ALL: [CoverageCategory; 3] = [
        CoverageCategory::Life,
        CoverageCategory::IncomeReplacement,
        CoverageCategory::CriticalIllness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageCategory::Life => "life",
            CoverageCategory::IncomeReplacement => "income-replacement",
            CoverageCategory::CriticalIllness => "critical-illness",
        }
    }
}

impl std::fmt::Display for CoverageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required coverage amount for each category, never negative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CoverageNeeds {
    pub life: f64,
    pub income_replacement: f64,
    pub critical_illness: f64,
}

impl CoverageNeeds {
    pub fn get(&self, category: CoverageCategory) -> f64 {
        match category {
            CoverageCategory::Life => self.life,
            CoverageCategory::IncomeReplacement => self.income_replacement,
            CoverageCategory::CriticalIllness => self.critical_illness,
        }
    }

    /// (category, amount) pairs in fixed category order
    pub fn iter(&self) -> impl Iterator<Item = (CoverageCategory, f64)> + '_ {
        CoverageCategory::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    pub fn total(&self) -> f64 {
        self.life + self.income_replacement + self.critical_illness
    }
}

/// Intermediate figures behind a needs calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedsBreakdown {
    /// Years of income replaced; negative past retirement age
    pub replacement_years: i64,
    pub income_replacement: f64,
    pub education_cost: f64,
    pub emergency_fund: f64,
    /// Liquid assets left after setting aside the emergency fund
    pub available_liquid_assets: f64,
    /// Annual yield on the emergency fund
    pub emergency_fund_income: f64,
    pub needs: CoverageNeeds,
}

/// Required coverage using the default planning assumptions
pub fn compute_coverage_needs(profile: &HouseholdProfile) -> CoverageNeeds {
    compute_coverage_needs_with(profile, &NeedsAssumptions::default())
}

/// Required coverage using the given assumptions
pub fn compute_coverage_needs_with(
    profile: &HouseholdProfile,
    assumptions: &NeedsAssumptions,
) -> CoverageNeeds {
    compute_needs_breakdown(profile, assumptions).needs
}

/// Full needs calculation.
///
/// Inputs are not validated. Only the final amount of each category is floored
/// at zero (and the available liquid assets), so an earner past retirement age
/// gets a negative income replacement term that reduces the life need.
pub fn compute_needs_breakdown(
    profile: &HouseholdProfile,
    assumptions: &NeedsAssumptions,
) -> NeedsBreakdown {
    if profile.age >= assumptions.retirement_age {
        log::warn!(
            "age {} is at or past retirement age {}: income replacement term is not positive",
            profile.age,
            assumptions.retirement_age
        );
    }

    // Life cover
    let years_to_retirement = assumptions.retirement_age as i64 - profile.age as i64;
    let replacement_years = years_to_retirement.min(assumptions.max_replacement_years as i64);
    let income_replacement =
        profile.annual_income * assumptions.income_replacement_ratio * replacement_years as f64;

    let education_cost = assumptions.education_cost_per_child
        * profile.children_in_education(assumptions.education_age_limit) as f64;

    let emergency_fund = profile.monthly_expenses * assumptions.emergency_fund_months;
    let available_liquid_assets = (profile.liquid_assets - emergency_fund).max(0.0);

    let life = (income_replacement + profile.debt + education_cost - available_liquid_assets).max(0.0);

    // Disability: monthly shortfall after the emergency fund's yield, annualised
    let emergency_fund_income = emergency_fund * assumptions.emergency_fund_yield;
    let monthly_shortfall =
        profile.annual_income * assumptions.disability_replacement_ratio - emergency_fund_income / 12.0;
    let income_replacement_need = monthly_shortfall.max(0.0) * 12.0;

    // Critical illness
    let critical_illness = (assumptions.treatment_cost
        + profile.annual_income * assumptions.income_loss_years
        - available_liquid_assets * assumptions.liquid_asset_usage)
        .max(0.0);

    log::debug!(
        "coverage needs: life={:.0} income_replacement={:.0} critical_illness={:.0}",
        life,
        income_replacement_need,
        critical_illness
    );

    NeedsBreakdown {
        replacement_years,
        income_replacement,
        education_cost,
        emergency_fund,
        available_liquid_assets,
        emergency_fund_income,
        needs: CoverageNeeds {
            life,
            income_replacement: income_replacement_need,
            critical_illness,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_profile() -> HouseholdProfile {
        HouseholdProfile::new(
            40,
            60_000_000.0,
            3_000_000.0,
            vec![0, 3, 6],
            Some(38),
            200_000_000.0,
            53_000_000.0,
            255_000_000.0,
        )
    }

    #[test]
    fn test_reference_household() {
        let breakdown = compute_needs_breakdown(&reference_profile(), &NeedsAssumptions::default());

        assert_eq!(breakdown.replacement_years, 20);
        assert!((breakdown.emergency_fund - 18_000_000.0).abs() < 1e-6);
        assert!((breakdown.available_liquid_assets - 35_000_000.0).abs() < 1e-6);
        assert!((breakdown.income_replacement - 840_000_000.0).abs() < 1e-3);
        assert!((breakdown.education_cost - 300_000_000.0).abs() < 1e-6);
        assert!((breakdown.needs.life - 1_305_000_000.0).abs() < 1e-3);

        // 60M * 0.6 - 18M * 0.03 / 12 = 35,955,000 per month, annualised
        assert!((breakdown.needs.income_replacement - 431_460_000.0).abs() < 1e-3);

        // 50M + 180M - 17.5M
        assert!((breakdown.needs.critical_illness - 212_500_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_all_categories_non_negative() {
        // Wealthy household with no income: every need clamps to zero
        let profile = HouseholdProfile::new(30, 0.0, 0.0, vec![], None, 0.0, 5e9, 5e9);
        let needs = compute_coverage_needs(&profile);

        assert_eq!(needs.iter().count(), 3);
        for (category, amount) in needs.iter() {
            assert!(amount >= 0.0, "{} need is negative", category);
        }
        assert_eq!(needs.life, 0.0);
        assert_eq!(needs.income_replacement, 0.0);
        assert_eq!(needs.critical_illness, 0.0);

        // Without liquid assets only the treatment cost remains
        let poor = HouseholdProfile::new(30, 0.0, 0.0, vec![], None, 0.0, 0.0, 0.0);
        assert_eq!(compute_coverage_needs(&poor).critical_illness, 50_000_000.0);
    }

    #[test]
    fn test_adult_children_excluded_from_education() {
        let mut profile = reference_profile();
        profile.children_ages = vec![19, 25, 18];
        let breakdown = compute_needs_breakdown(&profile, &NeedsAssumptions::default());
        assert!((breakdown.education_cost - 100_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_replacement_years_capped() {
        let mut profile = reference_profile();
        profile.age = 55;
        let breakdown = compute_needs_breakdown(&profile, &NeedsAssumptions::default());
        assert_eq!(breakdown.replacement_years, 10);
        assert!((breakdown.income_replacement - 420_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_past_retirement_term_goes_negative() {
        let mut profile = reference_profile();
        profile.age = 70;
        let breakdown = compute_needs_breakdown(&profile, &NeedsAssumptions::default());

        assert_eq!(breakdown.replacement_years, -5);
        assert!(breakdown.income_replacement < 0.0);
        // 200M + 300M - 35M - 210M, still positive here
        assert!((breakdown.needs.life - 255_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_deterministic() {
        let profile = reference_profile();
        assert_eq!(compute_coverage_needs(&profile), compute_coverage_needs(&profile));
    }

    #[test]
    fn test_serialized_keys_match_category_names() {
        let needs = compute_coverage_needs(&reference_profile());
        let value = serde_json::to_value(needs).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 3);
        for (category, amount) in needs.iter() {
            assert_eq!(object[category.as_str()].as_f64(), Some(amount), "{}", category);
        }
    }
}
