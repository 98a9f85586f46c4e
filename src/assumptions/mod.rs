//! Planning assumptions for the insurance needs engine

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use loader::{load_needs_terms, DEFAULT_ASSUMPTIONS_PATH};

/// Every constant the insurance needs calculation depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedsAssumptions {
    // Life cover
    /// Share of income the family needs replaced after a death
    pub income_replacement_ratio: f64,
    /// Age at which income replacement stops
    pub retirement_age: u32,
    /// Cap on the number of years of replaced income
    pub max_replacement_years: u32,
    /// Education cost budgeted per child
    pub education_cost_per_child: f64,
    /// Children at or above this age are considered through education
    pub education_age_limit: u32,

    // Emergency reserve
    /// Months of living expenses held back as an emergency fund
    pub emergency_fund_months: f64,
    /// Annual yield earned on the emergency fund
    pub emergency_fund_yield: f64,

    // Disability
    /// Share of income the disability cover should replace
    pub disability_replacement_ratio: f64,

    // Critical illness
    pub treatment_cost: f64,
    /// Years of income lost while recovering
    pub income_loss_years: f64,
    /// Share of available liquid assets that can be spent on treatment
    pub liquid_asset_usage: f64,

    // Liquidity haircuts
    pub stock_liquidity: f64,
    pub bond_liquidity: f64,

    // Advisory thresholds
    /// Minimum months of expenses held in liquid assets
    pub min_emergency_months: f64,
    /// Maximum premium as a percentage of monthly expenses
    pub max_premium_burden_pct: f64,
    /// Debt above this share of total assets is flagged
    pub max_debt_to_assets: f64,
}

impl Default for NeedsAssumptions {
    fn default() -> Self {
        Self {
            income_replacement_ratio: 0.7,
            retirement_age: 65,
            max_replacement_years: 20,
            education_cost_per_child: 100_000_000.0,
            education_age_limit: 19,
            emergency_fund_months: 6.0,
            emergency_fund_yield: 0.03,
            disability_replacement_ratio: 0.6,
            treatment_cost: 50_000_000.0,
            income_loss_years: 3.0,
            liquid_asset_usage: 0.5,
            stock_liquidity: 0.7,
            bond_liquidity: 0.9,
            min_emergency_months: 6.0,
            max_premium_burden_pct: 15.0,
            max_debt_to_assets: 0.5,
        }
    }
}

impl NeedsAssumptions {
    /// Load overrides from `insurance_needs.csv` in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load overrides from `insurance_needs.csv` in a specific directory.
    /// Terms missing from the file keep their default value.
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let terms = load_needs_terms(path)?;
        let mut assumptions = Self::default();
        for (term, value) in terms {
            assumptions.set_term(&term, value)?;
        }
        Ok(assumptions)
    }

    /// Override a single assumption by its CSV term name
    pub fn set_term(&mut self, term: &str, value: f64) -> Result<(), Box<dyn std::error::Error>> {
        match term {
            "income_replacement_ratio" => self.income_replacement_ratio = value,
            "retirement_age" => self.retirement_age = whole_years(term, value)?,
            "max_replacement_years" => self.max_replacement_years = whole_years(term, value)?,
            "education_cost_per_child" => self.education_cost_per_child = value,
            "education_age_limit" => self.education_age_limit = whole_years(term, value)?,
            "emergency_fund_months" => self.emergency_fund_months = value,
            "emergency_fund_yield" => self.emergency_fund_yield = value,
            "disability_replacement_ratio" => self.disability_replacement_ratio = value,
            "treatment_cost" => self.treatment_cost = value,
            "income_loss_years" => self.income_loss_years = value,
            "liquid_asset_usage" => self.liquid_asset_usage = value,
            "stock_liquidity" => self.stock_liquidity = value,
            "bond_liquidity" => self.bond_liquidity = value,
            "min_emergency_months" => self.min_emergency_months = value,
            "max_premium_burden_pct" => self.max_premium_burden_pct = value,
            "max_debt_to_assets" => self.max_debt_to_assets = value,
            other => return Err(format!("Unknown assumption term: {}", other).into()),
        }
        Ok(())
    }
}

fn whole_years(term: &str, value: f64) -> Result<u32, Box<dyn std::error::Error>> {
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(format!("{} must be a whole number of years, got {}", term, value).into());
    }
    Ok(value as u32)
}
