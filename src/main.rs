//! Household Planner CLI
//!
//! Command-line front end for the insurance needs and investment calculators.
//! Amount arguments are taken as typed text and go through the input parsers,
//! so "60,000,000" works and unparseable text falls back to the field default.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use household_planner::input::{
    default_rate_pct, parse_amount, parse_period, parse_rate, AmountField, ParsedInput, PeriodUnit,
};
use household_planner::insurance::{CoverageStatus, InsuranceReport};
use household_planner::projection::{
    sample_rows, CalculationMode, CompoundingFrequency, ContributionFrequency, DisplayInterval,
    InvestmentSummary, RateUnit,
};
use household_planner::scenario::FundingScenario;
use household_planner::{
    AssetHoldings, CurrentCoverage, HouseholdProfile, InvestmentParameters, InvestmentResult,
    NeedsAssumptions, ProjectionEngine,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "household_planner", version, about = "Insurance needs and investment projection calculators")]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate required insurance cover and compare with current cover
    Insurance(InsuranceArgs),
    /// Project an investment forward (FV) or solve for the initial amount (PV)
    Invest(InvestArgs),
}

#[derive(Debug, Args)]
struct InsuranceArgs {
    /// Age of the main earner
    #[arg(long, default_value_t = 40)]
    age: u32,

    /// Age of each child (repeat per child)
    #[arg(long = "child-age", default_values_t = [0, 3, 6])]
    children_ages: Vec<u32>,

    #[arg(long, default_value_t = 38)]
    spouse_age: u32,

    /// Household without a spouse
    #[arg(long)]
    no_spouse: bool,

    #[arg(long, default_value = "60,000,000")]
    annual_income: String,
    #[arg(long, default_value = "3,000,000")]
    monthly_expenses: String,
    #[arg(long, default_value = "200,000,000")]
    debt: String,

    #[arg(long, default_value = "30,000,000")]
    cash: String,
    #[arg(long, default_value = "20,000,000")]
    stocks: String,
    #[arg(long, default_value = "10,000,000")]
    bonds: String,
    #[arg(long, default_value = "150,000,000")]
    real_estate: String,
    #[arg(long, default_value = "40,000,000")]
    retirement: String,
    #[arg(long, default_value = "5,000,000")]
    other_assets: String,

    #[arg(long, default_value = "100,000,000")]
    life_cover: String,
    /// Monthly disability benefit
    #[arg(long, default_value = "1,000,000")]
    disability_monthly: String,
    #[arg(long, default_value = "50,000,000")]
    critical_illness_cover: String,
    #[arg(long, default_value = "300,000")]
    monthly_premium: String,

    /// Directory containing insurance_needs.csv overrides
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliMode {
    Fv,
    Pv,
}

impl From<CliMode> for CalculationMode {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::Fv => CalculationMode::FutureValue,
            CliMode::Pv => CalculationMode::PresentValue,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFrequency {
    Monthly,
    Annual,
}

impl From<CliFrequency> for ContributionFrequency {
    fn from(value: CliFrequency) -> Self {
        match value {
            CliFrequency::Monthly => ContributionFrequency::Monthly,
            CliFrequency::Annual => ContributionFrequency::Annual,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRateUnit {
    Annual,
    Monthly,
}

impl From<CliRateUnit> for RateUnit {
    fn from(value: CliRateUnit) -> Self {
        match value {
            CliRateUnit::Annual => RateUnit::Annual,
            CliRateUnit::Monthly => RateUnit::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliPeriodUnit {
    Years,
    Months,
}

impl From<CliPeriodUnit> for PeriodUnit {
    fn from(value: CliPeriodUnit) -> Self {
        match value {
            CliPeriodUnit::Years => PeriodUnit::Years,
            CliPeriodUnit::Months => PeriodUnit::Months,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCompounding {
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl From<CliCompounding> for CompoundingFrequency {
    fn from(value: CliCompounding) -> Self {
        match value {
            CliCompounding::Monthly => CompoundingFrequency::Monthly,
            CliCompounding::Quarterly => CompoundingFrequency::Quarterly,
            CliCompounding::Semiannual => CompoundingFrequency::Semiannual,
            CliCompounding::Annual => CompoundingFrequency::Annual,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliInterval {
    Yearly,
    Quarterly,
    Monthly,
}

impl From<CliInterval> for DisplayInterval {
    fn from(value: CliInterval) -> Self {
        match value {
            CliInterval::Yearly => DisplayInterval::Yearly,
            CliInterval::Quarterly => DisplayInterval::Quarterly,
            CliInterval::Monthly => DisplayInterval::Monthly,
        }
    }
}

#[derive(Debug, Args)]
struct InvestArgs {
    #[arg(long, value_enum, default_value_t = CliMode::Fv)]
    mode: CliMode,

    /// Initial investment (fv) or target amount (pv)
    #[arg(long)]
    amount: Option<String>,

    /// Periodic contribution
    #[arg(long, default_value = "500,000")]
    contribution: String,

    #[arg(long, value_enum, default_value_t = CliFrequency::Monthly)]
    contribution_frequency: CliFrequency,

    #[arg(long, default_value = "10")]
    period: String,

    #[arg(long, value_enum, default_value_t = CliPeriodUnit::Years)]
    period_unit: CliPeriodUnit,

    /// Rate in percent (default 7.0 annual, 0.6 monthly)
    #[arg(long)]
    rate: Option<String>,

    #[arg(long, value_enum, default_value_t = CliRateUnit::Annual)]
    rate_unit: CliRateUnit,

    #[arg(long, value_enum, default_value_t = CliCompounding::Monthly)]
    compounding: CliCompounding,

    /// Rows shown in the trajectory table
    #[arg(long, value_enum, default_value_t = CliInterval::Yearly)]
    interval: CliInterval,

    /// Write the full monthly trajectory to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// Thousands-separated whole amount, e.g. 1,305,000,000
fn fmt_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}%", v))
}

/// Warning line for an input that was replaced by its default
fn substitution_warning<T: Copy>(
    parsed: &ParsedInput<T>,
    label: &str,
    show: impl Fn(T) -> String,
) -> Option<String> {
    match parsed {
        ParsedInput::Parsed(_) => None,
        ParsedInput::Defaulted { value, reason } => {
            Some(format!("warning: {}: {} - using {}", label, reason, show(*value)))
        }
    }
}

fn reported<T: Copy>(parsed: ParsedInput<T>, label: &str, show: impl Fn(T) -> String) -> T {
    if let Some(warning) = substitution_warning(&parsed, label, show) {
        eprintln!("{}", warning);
    }
    parsed.value()
}

fn amount(text: &str, field: AmountField) -> f64 {
    reported(parse_amount(text, field), &format!("{:?}", field), fmt_amount)
}

#[derive(Serialize)]
struct InsuranceOutput<'a> {
    profile: &'a HouseholdProfile,
    holdings: &'a AssetHoldings,
    coverage: &'a CurrentCoverage,
    report: &'a InsuranceReport,
}

fn run_insurance(args: &InsuranceArgs, json: bool) -> Result<()> {
    let assumptions = match &args.assumptions {
        Some(dir) => NeedsAssumptions::from_csv_path(dir)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => NeedsAssumptions::default(),
    };

    let holdings = AssetHoldings {
        cash_savings: amount(&args.cash, AmountField::CashSavings),
        stocks: amount(&args.stocks, AmountField::Stocks),
        bonds: amount(&args.bonds, AmountField::Bonds),
        real_estate: amount(&args.real_estate, AmountField::RealEstate),
        retirement_accounts: amount(&args.retirement, AmountField::RetirementAccounts),
        other_assets: amount(&args.other_assets, AmountField::OtherAssets),
    };
    let coverage = CurrentCoverage {
        life: amount(&args.life_cover, AmountField::LifeCover),
        disability_monthly: amount(&args.disability_monthly, AmountField::DisabilityMonthly),
        critical_illness: amount(&args.critical_illness_cover, AmountField::CriticalIllnessCover),
        monthly_premium: amount(&args.monthly_premium, AmountField::MonthlyPremium),
    };
    let profile = HouseholdProfile::with_holdings(
        args.age,
        amount(&args.annual_income, AmountField::AnnualIncome),
        amount(&args.monthly_expenses, AmountField::MonthlyExpenses),
        args.children_ages.clone(),
        (!args.no_spouse).then_some(args.spouse_age),
        amount(&args.debt, AmountField::Debt),
        &holdings,
        &assumptions,
    );

    let report = InsuranceReport::build(&profile, &coverage, &assumptions);

    if json {
        let output = InsuranceOutput {
            profile: &profile,
            holdings: &holdings,
            coverage: &coverage,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Total assets: {}", fmt_amount(profile.total_assets));
    for share in holdings.allocation() {
        println!("  {:<20} {:>16} {:>7.1}%", share.class.as_str(), fmt_amount(share.amount), share.pct_of_total);
    }

    let gaps = &report.gaps;
    println!("\nCoverage analysis:");
    println!("{:<20} {:>16} {:>16} {:>16} {:>9}", "Category", "Needed", "Held", "Gap", "Gap %");
    println!("{}", "-".repeat(81));
    for gap in &gaps.categories {
        println!(
            "{:<20} {:>16} {:>16} {:>16} {:>9} {}",
            gap.category.as_str(),
            fmt_amount(gap.need),
            fmt_amount(gap.held),
            fmt_amount(gap.gap),
            fmt_pct(gap.gap_pct),
            if gap.status == CoverageStatus::Shortfall { "shortfall" } else { "covered" },
        );
    }
    println!(
        "{:<20} {:>16} {:>16} {:>16} {:>9}",
        "total",
        fmt_amount(gaps.total_needed),
        fmt_amount(gaps.total_held),
        fmt_amount(gaps.total_gap),
        fmt_pct(gaps.total_gap_pct),
    );

    let metrics = &report.metrics;
    println!("\nRisk exposure:");
    println!("  Debt / assets:       {}", fmt_pct(metrics.debt_to_assets.map(|r| r * 100.0)));
    println!("  Liquid / assets:     {}", fmt_pct(metrics.liquidity_share.map(|r| r * 100.0)));
    println!(
        "  Emergency reserve:   {}",
        metrics.emergency_months.map_or_else(|| "-".to_string(), |m| format!("{:.1} months", m))
    );
    println!("  Premium burden:      {}", fmt_pct(metrics.premium_burden_pct));

    println!("\nRecommendations:");
    for advice in &report.recommendations {
        println!("  - {}", advice);
    }

    Ok(())
}

fn investment_params(args: &InvestArgs) -> InvestmentParameters {
    let mode = CalculationMode::from(args.mode);
    let amount_field = match mode {
        CalculationMode::FutureValue => AmountField::InitialInvestment,
        CalculationMode::PresentValue => AmountField::TargetAmount,
    };
    let amount_text = args
        .amount
        .clone()
        .unwrap_or_else(|| fmt_amount(amount_field.default_value()));

    let rate_unit = RateUnit::from(args.rate_unit);
    let rate_pct = match &args.rate {
        Some(text) => reported(parse_rate(text, rate_unit), "rate", |v| format!("{}%", v)),
        None => default_rate_pct(rate_unit),
    };

    InvestmentParameters {
        mode,
        amount: amount(&amount_text, amount_field),
        contribution: amount(&args.contribution, AmountField::Contribution),
        contribution_frequency: args.contribution_frequency.into(),
        rate_pct,
        rate_unit,
        compounding: args.compounding.into(),
        total_months: reported(
            parse_period(&args.period, args.period_unit.into()),
            "period",
            |months| format!("{} months", months),
        ),
    }
}

fn write_trajectory_csv(path: &Path, result: &InvestmentResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in &result.trajectory {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_scenarios(scenarios: &[FundingScenario]) {
    println!("\nAlternative scenarios:");
    println!("{:<20} {:>16} {:>16} {:>8}", "Scenario", "Initial", "Monthly", "Rate");
    for s in scenarios {
        println!(
            "{:<20} {:>16} {:>16} {:>7.1}%",
            s.kind.label(),
            fmt_amount(s.initial),
            fmt_amount(s.monthly_contribution),
            s.annual_rate_pct
        );
    }
}

fn run_invest(args: &InvestArgs, json: bool) -> Result<()> {
    let params = investment_params(args);
    let result = ProjectionEngine::new(params).run();

    if let Some(path) = &args.csv {
        write_trajectory_csv(path, &result)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Monthly rate: {:.6}% (effective annual {:.3}%) over {} months",
        result.monthly_rate * 100.0,
        result.effective_annual_yield * 100.0,
        result.params.total_months
    );

    match &result.summary {
        InvestmentSummary::FutureValue(s) => {
            println!("\nFuture value:        {}", fmt_amount(s.future_value));
            println!("Total contributions: {}", fmt_amount(s.total_contributions));
            println!("Investment gain:     {} ({})", fmt_amount(s.investment_gain), fmt_pct(s.gain_pct));
            if let Some(multiple) = s.contribution_multiple {
                println!("Multiple of paid-in: {:.2}x", multiple);
            }
            println!("  from initial:      {}", fmt_amount(s.lump_sum_growth));
            println!("  from contributions: {}", fmt_amount(s.contribution_growth));
        }
        InvestmentSummary::PresentValue(s) => {
            println!("\nTarget:              {}", fmt_amount(s.target));
            println!("Required initial:    {}", fmt_amount(s.required_initial));
            println!("Total contributions: {}", fmt_amount(s.total_contributions));
            println!("Total required:      {}", fmt_amount(s.total_required));
            println!("Investment gain:     {} ({})", fmt_amount(s.future_gain), fmt_pct(s.gain_pct));
            println!("Initial grows to:    {}", fmt_amount(s.lump_sum_growth));
            print_scenarios(&result.scenarios);
        }
    }

    println!("\n{:>6} {:<8} {:>16} {:>16} {:>16}", "Period", "Unit", "Invested", "Gain", "Balance");
    println!("{}", "-".repeat(66));
    for row in sample_rows(&result.trajectory, args.interval.into()) {
        println!(
            "{:>6} {:<8} {:>16} {:>16} {:>16}",
            row.period,
            row.unit,
            fmt_amount(row.invested),
            fmt_amount(row.gain),
            fmt_amount(row.balance)
        );
    }

    if let Some(path) = &args.csv {
        println!("\nFull trajectory written to: {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Insurance(args) => run_insurance(args, cli.json),
        Command::Invest(args) => run_invest(args, cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_amount() {
        assert_eq!(fmt_amount(1_305_000_000.0), "1,305,000,000");
        assert_eq!(fmt_amount(999.4), "999");
        assert_eq!(fmt_amount(-12_345.0), "-12,345");
        assert_eq!(fmt_amount(0.0), "0");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["household_planner", "invest"]).unwrap();
        let Command::Invest(args) = cli.command else {
            panic!("expected invest");
        };
        let params = investment_params(&args);
        assert_eq!(params, InvestmentParameters::default());
    }

    #[test]
    fn test_cli_pv_monthly_rate() {
        let cli = Cli::try_parse_from([
            "household_planner", "invest", "--mode", "pv", "--rate-unit", "monthly",
            "--period", "36", "--period-unit", "months",
        ])
        .unwrap();
        let Command::Invest(args) = cli.command else {
            panic!("expected invest");
        };
        let params = investment_params(&args);
        assert_eq!(params.mode, CalculationMode::PresentValue);
        assert_eq!(params.amount, 100_000_000.0);
        assert_eq!(params.rate_pct, 0.6);
        assert_eq!(params.total_months, 36);
    }

    #[test]
    fn test_substitution_warnings() {
        let rate = parse_rate("fast", RateUnit::Annual);
        assert_eq!(
            substitution_warning(&rate, "rate", |v| format!("{}%", v)).as_deref(),
            Some("warning: rate: \"fast\" is not a finite number - using 7%")
        );

        let period = parse_period("", PeriodUnit::Years);
        assert_eq!(
            substitution_warning(&period, "period", |m| format!("{} months", m)).as_deref(),
            Some("warning: period: input is empty - using 120 months")
        );

        let parsed = parse_rate("5", RateUnit::Annual);
        assert_eq!(substitution_warning(&parsed, "rate", |v| format!("{}%", v)), None);
    }

    #[test]
    fn test_cli_bad_rate_and_period_fall_back() {
        let cli = Cli::try_parse_from([
            "household_planner", "invest", "--rate", "fast", "--period", "soon",
        ])
        .unwrap();
        let Command::Invest(args) = cli.command else {
            panic!("expected invest");
        };
        let params = investment_params(&args);
        assert_eq!(params.rate_pct, 7.0);
        assert_eq!(params.total_months, 120);
    }
}
