//! Run the insurance needs calculation for every household in a CSV file
//!
//! Outputs one row per household with needs, gaps and risk ratios

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use household_planner::household::{load_households, loader::DEFAULT_HOUSEHOLDS_PATH, HouseholdRecord};
use household_planner::insurance::InsuranceReport;
use household_planner::NeedsAssumptions;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Insurance needs for a batch of households")]
struct Cli {
    /// Households CSV
    #[arg(long, default_value = DEFAULT_HOUSEHOLDS_PATH)]
    input: PathBuf,

    #[arg(long, default_value = "household_needs.csv")]
    output: PathBuf,

    /// Directory containing insurance_needs.csv overrides
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

/// One output row per household
#[derive(Debug, Serialize)]
struct NeedsRow {
    #[serde(rename = "HouseholdID")]
    household_id: u32,
    #[serde(rename = "LifeNeed")]
    life_need: f64,
    #[serde(rename = "IncomeReplacementNeed")]
    income_replacement_need: f64,
    #[serde(rename = "CriticalIllnessNeed")]
    critical_illness_need: f64,
    #[serde(rename = "TotalNeeded")]
    total_needed: f64,
    #[serde(rename = "TotalHeld")]
    total_held: f64,
    #[serde(rename = "TotalGap")]
    total_gap: f64,
    #[serde(rename = "Shortfalls")]
    shortfalls: usize,
    #[serde(rename = "EmergencyMonths")]
    emergency_months: Option<f64>,
    #[serde(rename = "PremiumBurdenPct")]
    premium_burden_pct: Option<f64>,
}

impl NeedsRow {
    fn from_report(record: &HouseholdRecord, report: &InsuranceReport) -> Self {
        let needs = report.needs();
        Self {
            household_id: record.household_id,
            life_need: needs.life,
            income_replacement_need: needs.income_replacement,
            critical_illness_need: needs.critical_illness,
            total_needed: report.gaps.total_needed,
            total_held: report.gaps.total_held,
            total_gap: report.gaps.total_gap,
            shortfalls: report.gaps.shortfalls().count(),
            emergency_months: report.metrics.emergency_months,
            premium_burden_pct: report.metrics.premium_burden_pct,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assumptions = match &cli.assumptions {
        Some(dir) => NeedsAssumptions::from_csv_path(dir)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => NeedsAssumptions::default(),
    };

    let start = Instant::now();
    println!("Loading households from {}...", cli.input.display());

    let households = load_households(&cli.input, &assumptions)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("loading households from {}", cli.input.display()))?;
    println!("Loaded {} households in {:?}", households.len(), start.elapsed());

    // Households are independent, run them in parallel
    let calc_start = Instant::now();
    let rows: Vec<NeedsRow> = households
        .par_iter()
        .map(|record| {
            let report = InsuranceReport::build(&record.profile, &record.coverage, &assumptions);
            NeedsRow::from_report(record, &report)
        })
        .collect();
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Output written to {}", cli.output.display());

    // Print summary stats
    let with_shortfall = rows.iter().filter(|r| r.shortfalls > 0).count();
    let total_gap: f64 = rows.iter().map(|r| r.total_gap.max(0.0)).sum();
    println!("\nBatch Summary:");
    println!("  Households:           {}", rows.len());
    println!("  With any shortfall:   {}", with_shortfall);
    println!("  Sum of net shortfall: {:.0}", total_gap);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
