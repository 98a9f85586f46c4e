//! Core projection engine for future value and present value runs

use serde::{Deserialize, Serialize};

use super::growth::{future_value, growth_factor, present_value};
use super::rates::{
    annual_rate_pct, effective_annual_yield, resolve_effective_monthly_rate, CompoundingFrequency,
    RateUnit,
};
use super::trajectory::{generate_trajectory, ProjectionRow};
use crate::scenario::{funding_scenarios, FundingScenario};
use crate::ratio::{multiple_of, pct_of};

/// Shortest projection horizon in months
pub const MIN_PROJECTION_MONTHS: u32 = 1;

/// Longest projection horizon in months (50 years)
pub const MAX_PROJECTION_MONTHS: u32 = 600;

/// What the run solves for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMode {
    /// Grow an initial amount plus contributions forward
    FutureValue,
    /// Initial amount needed to reach a target
    PresentValue,
}

/// How often the periodic contribution is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionFrequency {
    Monthly,
    /// Paid once a year in the first month of each 12-month cycle
    Annual,
}

impl ContributionFrequency {
    /// Monthly equivalent of a contribution stated at this frequency
    pub fn monthly_equivalent(&self, contribution: f64) -> f64 {
        match self {
            ContributionFrequency::Monthly => contribution,
            ContributionFrequency::Annual => contribution / 12.0,
        }
    }

    /// Amount paid in a given month (1-indexed) for a monthly equivalent contribution
    pub fn contribution_due(&self, month: u32, monthly_equivalent: f64) -> f64 {
        match self {
            ContributionFrequency::Monthly => monthly_equivalent,
            ContributionFrequency::Annual if month >= 1 && (month - 1) % 12 == 0 => {
                monthly_equivalent * 12.0
            }
            ContributionFrequency::Annual => 0.0,
        }
    }
}

/// Inputs of an investment projection, already validated by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParameters {
    pub mode: CalculationMode,

    /// Initial principal (future value mode) or target amount (present value mode)
    pub amount: f64,

    /// Periodic contribution, per `contribution_frequency`
    pub contribution: f64,

    pub contribution_frequency: ContributionFrequency,

    /// Stated rate in percent
    pub rate_pct: f64,

    pub rate_unit: RateUnit,

    pub compounding: CompoundingFrequency,

    /// Horizon in months (1–600)
    pub total_months: u32,
}

impl Default for InvestmentParameters {
    fn default() -> Self {
        Self {
            mode: CalculationMode::FutureValue,
            amount: 10_000_000.0,
            contribution: 500_000.0,
            contribution_frequency: ContributionFrequency::Monthly,
            rate_pct: 7.0,
            rate_unit: RateUnit::Annual,
            compounding: CompoundingFrequency::Monthly,
            total_months: 120,
        }
    }
}

impl InvestmentParameters {
    /// Effective monthly rate for the stated rate and compounding
    pub fn monthly_rate(&self) -> f64 {
        resolve_effective_monthly_rate(self.rate_pct, self.rate_unit, self.compounding)
    }

    /// Contribution expressed per month
    pub fn monthly_contribution(&self) -> f64 {
        self.contribution_frequency.monthly_equivalent(self.contribution)
    }

    /// Stated rate in annual percent
    pub fn annual_rate_pct(&self) -> f64 {
        annual_rate_pct(self.rate_pct, self.rate_unit)
    }
}

/// Result figures of a future value run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureValueSummary {
    pub future_value: f64,
    /// Initial principal plus all contributions
    pub total_contributions: f64,
    pub investment_gain: f64,
    /// Gain over total contributions, percent; None without contributions
    pub gain_pct: Option<f64>,
    /// Future value as a multiple of total contributions
    pub contribution_multiple: Option<f64>,
    /// What the initial principal alone grows to
    pub lump_sum_growth: f64,
    /// Future value attributable to the contributions
    pub contribution_growth: f64,
}

/// Result figures of a present value run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentValueSummary {
    pub target: f64,
    pub required_initial: f64,
    /// Contributions over the horizon, excluding the initial amount
    pub total_contributions: f64,
    /// required_initial + total_contributions
    pub total_required: f64,
    pub future_gain: f64,
    /// Gain over total required, percent; None when nothing is required
    pub gain_pct: Option<f64>,
    /// What the required initial amount grows to
    pub lump_sum_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum InvestmentSummary {
    FutureValue(FutureValueSummary),
    PresentValue(PresentValueSummary),
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub params: InvestmentParameters,
    pub monthly_rate: f64,
    pub effective_annual_yield: f64,
    pub summary: InvestmentSummary,
    /// Monthly rows, months 0..=total_months
    pub trajectory: Vec<ProjectionRow>,
    /// Alternative ways to fund the target (present value mode only)
    pub scenarios: Vec<FundingScenario>,
}

impl InvestmentResult {
    pub fn final_balance(&self) -> f64 {
        self.trajectory.last().map(|r| r.balance).unwrap_or(0.0)
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    params: InvestmentParameters,
}

impl ProjectionEngine {
    /// Create a new projection engine for the given parameters
    pub fn new(params: InvestmentParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &InvestmentParameters {
        &self.params
    }

    /// Run the projection for the configured mode
    pub fn run(&self) -> InvestmentResult {
        let params = &self.params;
        let rate = params.monthly_rate();
        let monthly = params.monthly_contribution();
        let months = params.total_months;
        let growth = growth_factor(rate, months);

        log::debug!(
            "projecting {:?} over {} months at monthly rate {:.8}",
            params.mode,
            months,
            rate
        );

        let (summary, initial, scenarios) = match params.mode {
            CalculationMode::FutureValue => {
                let initial = params.amount;
                let fv = future_value(initial, monthly, rate, months);
                let total_contributions = initial + monthly * months as f64;
                let investment_gain = fv - total_contributions;
                let lump_sum_growth = initial * growth;

                let summary = FutureValueSummary {
                    future_value: fv,
                    total_contributions,
                    investment_gain,
                    gain_pct: pct_of(investment_gain, total_contributions),
                    contribution_multiple: multiple_of(fv, total_contributions),
                    lump_sum_growth,
                    contribution_growth: fv - lump_sum_growth,
                };
                (InvestmentSummary::FutureValue(summary), initial, Vec::new())
            }
            CalculationMode::PresentValue => {
                let target = params.amount;
                let required_initial = present_value(target, monthly, rate, months);
                let total_contributions = monthly * months as f64;
                let total_required = required_initial + total_contributions;
                let future_gain = target - total_required;

                let summary = PresentValueSummary {
                    target,
                    required_initial,
                    total_contributions,
                    total_required,
                    future_gain,
                    gain_pct: pct_of(future_gain, total_required),
                    lump_sum_growth: required_initial * growth,
                };
                let scenarios = funding_scenarios(
                    target,
                    required_initial,
                    monthly,
                    rate,
                    months,
                    params.annual_rate_pct(),
                );
                (InvestmentSummary::PresentValue(summary), required_initial, scenarios)
            }
        };

        let trajectory =
            generate_trajectory(initial, monthly, rate, months, params.contribution_frequency);

        InvestmentResult {
            params: params.clone(),
            monthly_rate: rate,
            effective_annual_yield: effective_annual_yield(rate),
            summary,
            trajectory,
            scenarios,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_contribution_schedule() {
        let annual = ContributionFrequency::Annual;
        assert_eq!(annual.monthly_equivalent(1_200.0), 100.0);
        assert_eq!(annual.contribution_due(1, 100.0), 1_200.0);
        assert_eq!(annual.contribution_due(2, 100.0), 0.0);
        assert_eq!(annual.contribution_due(12, 100.0), 0.0);
        assert_eq!(annual.contribution_due(13, 100.0), 1_200.0);
        assert_eq!(ContributionFrequency::Monthly.contribution_due(7, 100.0), 100.0);
    }

    #[test]
    fn test_future_value_run() {
        let result = ProjectionEngine::new(InvestmentParameters::default()).run();

        let rate = 0.07 / 12.0;
        let g = (1.0_f64 + rate).powf(120.0);
        let expected = 10_000_000.0 * g + 500_000.0 * (g - 1.0) / rate;

        let InvestmentSummary::FutureValue(summary) = &result.summary else {
            panic!("expected a future value summary");
        };
        assert_relative_eq!(summary.future_value, expected, max_relative = 1e-6);
        assert_relative_eq!(summary.total_contributions, 70_000_000.0);
        assert_relative_eq!(summary.lump_sum_growth, 10_000_000.0 * g, max_relative = 1e-9);
        assert_relative_eq!(
            summary.lump_sum_growth + summary.contribution_growth,
            summary.future_value,
            max_relative = 1e-12
        );
        assert!(result.scenarios.is_empty());
        assert_eq!(result.trajectory.len(), 121);

        // End-of-month monthly contributions: the simulation matches the closed form
        assert_relative_eq!(result.final_balance(), summary.future_value, max_relative = 1e-9);
    }

    #[test]
    fn test_present_value_run() {
        let params = InvestmentParameters {
            mode: CalculationMode::PresentValue,
            amount: 100_000_000.0,
            contribution: 0.0,
            ..Default::default()
        };
        let result = ProjectionEngine::new(params).run();

        let InvestmentSummary::PresentValue(summary) = &result.summary else {
            panic!("expected a present value summary");
        };
        let expected = 100_000_000.0 / (1.0_f64 + 0.07 / 12.0).powf(120.0);
        assert_relative_eq!(summary.required_initial, expected, max_relative = 1e-6);
        assert_eq!(summary.total_contributions, 0.0);
        assert_relative_eq!(result.final_balance(), 100_000_000.0, max_relative = 1e-9);
        assert_eq!(result.trajectory[0].balance, summary.required_initial);
        assert_eq!(result.scenarios.len(), 3);
    }

    #[test]
    fn test_annual_contribution_summary_uses_monthly_equivalent() {
        let params = InvestmentParameters {
            contribution: 1_200_000.0,
            contribution_frequency: ContributionFrequency::Annual,
            rate_pct: 0.0,
            total_months: 24,
            ..Default::default()
        };
        let result = ProjectionEngine::new(params).run();

        let InvestmentSummary::FutureValue(summary) = &result.summary else {
            panic!("expected a future value summary");
        };
        assert_eq!(summary.future_value, 10_000_000.0 + 2_400_000.0);
        assert_eq!(summary.investment_gain, 0.0);
        assert_eq!(summary.contribution_multiple, Some(1.0));
        assert_eq!(result.final_balance(), 12_400_000.0);
    }

    #[test]
    fn test_contribution_multiple() {
        let result = ProjectionEngine::new(InvestmentParameters::default()).run();
        let InvestmentSummary::FutureValue(summary) = &result.summary else {
            panic!("expected a future value summary");
        };
        assert_relative_eq!(
            summary.contribution_multiple.unwrap(),
            summary.future_value / 70_000_000.0,
            max_relative = 1e-12
        );

        // Nothing paid in, no multiple
        let empty = InvestmentParameters { amount: 0.0, contribution: 0.0, ..Default::default() };
        let InvestmentSummary::FutureValue(summary) = ProjectionEngine::new(empty).run().summary else {
            panic!("expected a future value summary");
        };
        assert_eq!(summary.contribution_multiple, None);
        assert_eq!(summary.gain_pct, None);
    }
}
