//! Load household records from a CSV file for batch runs

use super::{AssetHoldings, CurrentCoverage, HouseholdProfile};
use crate::assumptions::NeedsAssumptions;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Default location of the batch input file
pub const DEFAULT_HOUSEHOLDS_PATH: &str = "households.csv";

/// One household of a batch: profile, holdings breakdown and current coverage
#[derive(Debug, Clone)]
pub struct HouseholdRecord {
    pub household_id: u32,
    pub profile: HouseholdProfile,
    pub holdings: AssetHoldings,
    pub coverage: CurrentCoverage,
}

/// Raw CSV row matching households.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "HouseholdID")]
    household_id: u32,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "AnnualIncome")]
    annual_income: f64,
    #[serde(rename = "MonthlyExpenses")]
    monthly_expenses: f64,
    /// Semicolon separated, e.g. "0;3;6"
    #[serde(rename = "ChildAges")]
    child_ages: String,
    #[serde(rename = "SpouseAge")]
    spouse_age: Option<u32>,
    #[serde(rename = "Debt")]
    debt: f64,
    #[serde(rename = "Cash")]
    cash: f64,
    #[serde(rename = "Stocks")]
    stocks: f64,
    #[serde(rename = "Bonds")]
    bonds: f64,
    #[serde(rename = "RealEstate")]
    real_estate: f64,
    #[serde(rename = "Retirement")]
    retirement: f64,
    #[serde(rename = "OtherAssets")]
    other_assets: f64,
    #[serde(rename = "LifeCover")]
    life_cover: f64,
    #[serde(rename = "DisabilityMonthly")]
    disability_monthly: f64,
    #[serde(rename = "CriticalIllnessCover")]
    critical_illness_cover: f64,
    #[serde(rename = "MonthlyPremium")]
    monthly_premium: f64,
}

impl CsvRow {
    fn to_record(self, assumptions: &NeedsAssumptions) -> Result<HouseholdRecord, Box<dyn Error>> {
        let children_ages = parse_child_ages(&self.child_ages).map_err(|e| {
            format!("Household {}: invalid ChildAges {:?}: {}", self.household_id, self.child_ages, e)
        })?;

        let holdings = AssetHoldings {
            cash_savings: self.cash,
            stocks: self.stocks,
            bonds: self.bonds,
            real_estate: self.real_estate,
            retirement_accounts: self.retirement,
            other_assets: self.other_assets,
        };

        let profile = HouseholdProfile::with_holdings(
            self.age,
            self.annual_income,
            self.monthly_expenses,
            children_ages,
            self.spouse_age,
            self.debt,
            &holdings,
            assumptions,
        );

        Ok(HouseholdRecord {
            household_id: self.household_id,
            profile,
            holdings,
            coverage: CurrentCoverage {
                life: self.life_cover,
                disability_monthly: self.disability_monthly,
                critical_illness: self.critical_illness_cover,
                monthly_premium: self.monthly_premium,
            },
        })
    }
}

fn parse_child_ages(field: &str) -> Result<Vec<u32>, std::num::ParseIntError> {
    field
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Load all households from a CSV file
pub fn load_households<P: AsRef<Path>>(
    path: P,
    assumptions: &NeedsAssumptions,
) -> Result<Vec<HouseholdRecord>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    read_records(reader, assumptions)
}

/// Load households from any reader (e.g., string buffer, stdin)
pub fn load_households_from_reader<R: std::io::Read>(
    reader: R,
    assumptions: &NeedsAssumptions,
) -> Result<Vec<HouseholdRecord>, Box<dyn Error>> {
    read_records(Reader::from_reader(reader), assumptions)
}

fn read_records<R: std::io::Read>(
    mut reader: Reader<R>,
    assumptions: &NeedsAssumptions,
) -> Result<Vec<HouseholdRecord>, Box<dyn Error>> {
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.to_record(assumptions)?);
    }

    Ok(records)
}
