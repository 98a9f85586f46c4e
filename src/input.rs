//! Boundary parsing of raw text input
//!
//! Amounts typed by a user (optionally with thousands separators) are parsed
//! here before reaching the calculators. Text that cannot be parsed is replaced
//! by the field's default, and the substitution is reported in the result
//! instead of happening silently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::projection::rates::{MAX_ANNUAL_RATE_PCT, MAX_MONTHLY_RATE_PCT};
use crate::projection::{RateUnit, MAX_PROJECTION_MONTHS, MIN_PROJECTION_MONTHS};

/// Longest horizon that can be entered in years
pub const MAX_PROJECTION_YEARS: u32 = 50;

/// Why a raw input was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("input is empty")]
    Empty,

    #[error("{0:?} is not a whole number")]
    NotAnInteger(String),

    #[error("{0:?} is not a finite number")]
    NotANumber(String),
}

/// Outcome of parsing one input: the parsed value or a named default substitution
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedInput<T> {
    Parsed(T),
    Defaulted { value: T, reason: InputError },
}

impl<T: Copy> ParsedInput<T> {
    /// Value to use, parsed or substituted
    pub fn value(&self) -> T {
        match self {
            ParsedInput::Parsed(value) => *value,
            ParsedInput::Defaulted { value, .. } => *value,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, ParsedInput::Defaulted { .. })
    }

    fn or_default(result: Result<T, InputError>, default: T, field: &str) -> Self {
        match result {
            Ok(value) => ParsedInput::Parsed(value),
            Err(reason) => {
                log::warn!("{}: {}, using default", field, reason);
                ParsedInput::Defaulted { value: default, reason }
            }
        }
    }
}

/// Monetary input fields and their fallback values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountField {
    AnnualIncome,
    MonthlyExpenses,
    Debt,
    CashSavings,
    Stocks,
    Bonds,
    RealEstate,
    RetirementAccounts,
    OtherAssets,
    LifeCover,
    DisabilityMonthly,
    CriticalIllnessCover,
    MonthlyPremium,
    InitialInvestment,
    TargetAmount,
    Contribution,
}

impl AmountField {
    /// Value substituted when the input cannot be parsed
    pub fn default_value(&self) -> f64 {
        match self {
            AmountField::AnnualIncome => 60_000_000.0,
            AmountField::MonthlyExpenses => 3_000_000.0,
            AmountField::Debt => 200_000_000.0,
            AmountField::CashSavings => 30_000_000.0,
            AmountField::Stocks => 20_000_000.0,
            AmountField::Bonds => 10_000_000.0,
            AmountField::RealEstate => 150_000_000.0,
            AmountField::RetirementAccounts => 40_000_000.0,
            AmountField::OtherAssets => 5_000_000.0,
            AmountField::LifeCover => 100_000_000.0,
            AmountField::DisabilityMonthly => 1_000_000.0,
            AmountField::CriticalIllnessCover => 50_000_000.0,
            AmountField::MonthlyPremium => 300_000.0,
            AmountField::InitialInvestment => 10_000_000.0,
            AmountField::TargetAmount => 100_000_000.0,
            AmountField::Contribution => 500_000.0,
        }
    }
}

/// How a projection horizon was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodUnit {
    Years,
    Months,
}

fn strip_separators(text: &str) -> Result<String, InputError> {
    let cleaned: String = text.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(cleaned)
}

fn parse_integer(text: &str) -> Result<i64, InputError> {
    let cleaned = strip_separators(text)?;
    cleaned
        .parse::<i64>()
        .map_err(|_| InputError::NotAnInteger(text.to_string()))
}

fn parse_float(text: &str) -> Result<f64, InputError> {
    let cleaned = strip_separators(text)?;
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::NotANumber(text.to_string())),
    }
}

/// Parse a whole currency amount such as "60,000,000"
pub fn parse_amount(text: &str, field: AmountField) -> ParsedInput<f64> {
    let result = parse_integer(text).map(|v| v as f64);
    ParsedInput::or_default(result, field.default_value(), &format!("{:?}", field))
}

/// Rate in percent used when none is given or it cannot be parsed
pub fn default_rate_pct(unit: RateUnit) -> f64 {
    match unit {
        RateUnit::Annual => 7.0,
        RateUnit::Monthly => 0.6,
    }
}

/// Parse a rate in percent, clamped to 0–30 (annual) or 0–5 (monthly)
pub fn parse_rate(text: &str, unit: RateUnit) -> ParsedInput<f64> {
    let max = match unit {
        RateUnit::Annual => MAX_ANNUAL_RATE_PCT,
        RateUnit::Monthly => MAX_MONTHLY_RATE_PCT,
    };
    let result = parse_float(text).map(|v| v.clamp(0.0, max));
    ParsedInput::or_default(result, default_rate_pct(unit), "rate")
}

/// Parse a horizon and return it in months.
/// Years are clamped to 1–50, months to 1–600; defaults are 10 years or 120 months.
pub fn parse_period(text: &str, unit: PeriodUnit) -> ParsedInput<u32> {
    let result = parse_integer(text);
    match unit {
        PeriodUnit::Years => {
            let years = result.map(|v| v.clamp(1, MAX_PROJECTION_YEARS as i64) as u32);
            ParsedInput::or_default(years.map(|y| y * 12), 120, "period")
        }
        PeriodUnit::Months => {
            let months = result.map(|v| {
                v.clamp(MIN_PROJECTION_MONTHS as i64, MAX_PROJECTION_MONTHS as i64) as u32
            });
            ParsedInput::or_default(months, 120, "period")
        }
    }
}
