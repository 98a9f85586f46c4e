//! Household data structures feeding the insurance needs engine

use serde::{Deserialize, Serialize};

use crate::assumptions::NeedsAssumptions;
use crate::ratio::pct_of;

/// Asset class of a household holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Cash, deposits, money market accounts
    CashSavings,
    /// Stocks, ETFs, funds
    Stocks,
    /// Government and corporate bonds
    Bonds,
    /// Investment real estate (excluding the residence)
    RealEstate,
    /// Pension and retirement savings
    RetirementAccounts,
    /// Vehicles, precious metals, anything else
    OtherAssets,
}

impl AssetClass {
    pub const ALL: [AssetClass; 6] = [
        AssetClass::CashSavings,
        AssetClass::Stocks,
        AssetClass::Bonds,
        AssetClass::RealEstate,
        AssetClass::RetirementAccounts,
        AssetClass::OtherAssets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::CashSavings => "cash-savings",
            AssetClass::Stocks => "stocks",
            AssetClass::Bonds => "bonds",
            AssetClass::RealEstate => "real-estate",
            AssetClass::RetirementAccounts => "retirement-accounts",
            AssetClass::OtherAssets => "other-assets",
        }
    }
}

/// Share of one asset class in the household's total assets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetShare {
    pub class: AssetClass,
    pub amount: f64,
    /// Percentage of total assets (0 when total is 0)
    pub pct_of_total: f64,
}

/// Breakdown of what the household owns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetHoldings {
    pub cash_savings: f64,
    pub stocks: f64,
    pub bonds: f64,
    pub real_estate: f64,
    pub retirement_accounts: f64,
    pub other_assets: f64,
}

impl AssetHoldings {
    /// Amount held in a given asset class
    pub fn amount(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::CashSavings => self.cash_savings,
            AssetClass::Stocks => self.stocks,
            AssetClass::Bonds => self.bonds,
            AssetClass::RealEstate => self.real_estate,
            AssetClass::RetirementAccounts => self.retirement_accounts,
            AssetClass::OtherAssets => self.other_assets,
        }
    }

    /// Sum of every asset class
    pub fn total_assets(&self) -> f64 {
        AssetClass::ALL.iter().map(|&c| self.amount(c)).sum()
    }

    /// Assets that can be drawn on quickly.
    /// Cash counts in full, stocks and bonds after the liquidity haircut.
    pub fn liquid_assets(&self, assumptions: &NeedsAssumptions) -> f64 {
        self.cash_savings
            + self.stocks * assumptions.stock_liquidity
            + self.bonds * assumptions.bond_liquidity
    }

    /// Per-class allocation in declaration order
    pub fn allocation(&self) -> Vec<AssetShare> {
        let total = self.total_assets();
        AssetClass::ALL
            .iter()
            .map(|&class| {
                let amount = self.amount(class);
                let pct_of_total = pct_of(amount, total).unwrap_or(0.0);
                AssetShare { class, amount, pct_of_total }
            })
            .collect()
    }
}

/// Insurance the household already holds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentCoverage {
    /// Death benefit across all life policies
    pub life: f64,

    /// Monthly benefit paid on disability
    pub disability_monthly: f64,

    /// Lump sum on critical illness diagnosis
    pub critical_illness: f64,

    /// Total monthly premium paid across all policies
    pub monthly_premium: f64,
}

impl CurrentCoverage {
    /// Annualised disability benefit, comparable with the income replacement need
    pub fn disability_annual(&self) -> f64 {
        self.disability_monthly * 12.0
    }
}

/// Household and financial parameters for the insurance needs engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    /// Age of the main earner
    pub age: u32,

    /// Annual income of the main earner
    pub annual_income: f64,

    /// Monthly living expenses of the household
    pub monthly_expenses: f64,

    /// Number of dependents
    pub dependents: u32,

    /// Ages of the children, in input order
    #[serde(default)]
    pub children_ages: Vec<u32>,

    pub spouse_exists: bool,

    #[serde(default)]
    pub spouse_age: Option<u32>,

    /// Outstanding loan balance
    pub debt: f64,

    /// Liquid assets available to offset needs (see `AssetHoldings::liquid_assets`)
    pub liquid_assets: f64,

    /// Total assets; expected to be at least `liquid_assets` but not enforced
    pub total_assets: f64,
}

impl HouseholdProfile {
    /// Create a profile from already aggregated asset figures.
    /// Dependents are counted from `children_ages`, spouse presence from `spouse_age`.
    pub fn new(
        age: u32,
        annual_income: f64,
        monthly_expenses: f64,
        children_ages: Vec<u32>,
        spouse_age: Option<u32>,
        debt: f64,
        liquid_assets: f64,
        total_assets: f64,
    ) -> Self {
        Self {
            age,
            annual_income,
            monthly_expenses,
            dependents: children_ages.len() as u32,
            children_ages,
            spouse_exists: spouse_age.is_some(),
            spouse_age,
            debt,
            liquid_assets,
            total_assets,
        }
    }

    /// Create a profile whose liquid and total assets come from a holdings breakdown
    pub fn with_holdings(
        age: u32,
        annual_income: f64,
        monthly_expenses: f64,
        children_ages: Vec<u32>,
        spouse_age: Option<u32>,
        debt: f64,
        holdings: &AssetHoldings,
        assumptions: &NeedsAssumptions,
    ) -> Self {
        Self::new(
            age,
            annual_income,
            monthly_expenses,
            children_ages,
            spouse_age,
            debt,
            holdings.liquid_assets(assumptions),
            holdings.total_assets(),
        )
    }

    /// Number of children still below the education age limit
    pub fn children_in_education(&self, education_age_limit: u32) -> usize {
        self.children_ages
            .iter()
            .filter(|&&age| age < education_age_limit)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_holdings() -> AssetHoldings {
        AssetHoldings {
            cash_savings: 30_000_000.0,
            stocks: 20_000_000.0,
            bonds: 10_000_000.0,
            real_estate: 150_000_000.0,
            retirement_accounts: 40_000_000.0,
            other_assets: 5_000_000.0,
        }
    }

    #[test]
    fn test_liquid_and_total_assets() {
        let holdings = sample_holdings();
        let assumptions = NeedsAssumptions::default();

        assert!((holdings.total_assets() - 255_000_000.0).abs() < 1e-6);
        // 30M + 0.7 * 20M + 0.9 * 10M
        assert!((holdings.liquid_assets(&assumptions) - 53_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_allocation_shares() {
        let allocation = sample_holdings().allocation();
        assert_eq!(allocation.len(), 6);
        assert_eq!(allocation[0].class, AssetClass::CashSavings);

        let total_pct: f64 = allocation.iter().map(|s| s.pct_of_total).sum();
        assert!((total_pct - 100.0).abs() < 1e-9);

        let empty = AssetHoldings::default().allocation();
        assert!(empty.iter().all(|s| s.pct_of_total == 0.0));
    }

    #[test]
    fn test_profile_from_holdings() {
        let assumptions = NeedsAssumptions::default();
        let profile = HouseholdProfile::with_holdings(
            40,
            60_000_000.0,
            3_000_000.0,
            vec![0, 3, 21],
            Some(38),
            200_000_000.0,
            &sample_holdings(),
            &assumptions,
        );

        assert_eq!(profile.dependents, 3);
        assert!(profile.spouse_exists);
        assert_eq!(profile.children_in_education(19), 2);
        assert!((profile.liquid_assets - 53_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_disability_annualised() {
        let coverage = CurrentCoverage {
            disability_monthly: 1_000_000.0,
            ..Default::default()
        };
        assert_eq!(coverage.disability_annual(), 12_000_000.0);
    }
}
