//! Funding scenarios and batch projections
//!
//! Holds a base set of investment parameters and runs variations of it
//! (different rates, horizons, contributions) without rebuilding the inputs.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::projection::growth::{present_value, required_contribution};
use crate::projection::{InvestmentParameters, InvestmentResult, ProjectionEngine};

/// Way of reaching a target amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// A single initial investment, no contributions
    InitialOnly,
    /// Monthly contributions only, nothing up front
    ContributionOnly,
    /// The user's initial amount and contribution
    CurrentPlan,
}

impl ScenarioKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::InitialOnly => "initial only",
            ScenarioKind::ContributionOnly => "contributions only",
            ScenarioKind::CurrentPlan => "current plan",
        }
    }
}

/// One way of funding a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingScenario {
    pub kind: ScenarioKind,
    pub initial: f64,
    pub monthly_contribution: f64,
    /// Stated annual rate in percent
    pub annual_rate_pct: f64,
}

/// Initial-only, contribution-only and current plan funding of `target`
pub fn funding_scenarios(
    target: f64,
    current_initial: f64,
    current_monthly: f64,
    monthly_rate: f64,
    total_months: u32,
    annual_rate_pct: f64,
) -> Vec<FundingScenario> {
    vec![
        FundingScenario {
            kind: ScenarioKind::InitialOnly,
            initial: present_value(target, 0.0, monthly_rate, total_months),
            monthly_contribution: 0.0,
            annual_rate_pct,
        },
        FundingScenario {
            kind: ScenarioKind::ContributionOnly,
            initial: 0.0,
            monthly_contribution: required_contribution(target, monthly_rate, total_months),
            annual_rate_pct,
        },
        FundingScenario {
            kind: ScenarioKind::CurrentPlan,
            initial: current_initial,
            monthly_contribution: current_monthly,
            annual_rate_pct,
        },
    ]
}

/// Runs variations of a base set of investment parameters
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(InvestmentParameters::default());
///
/// // Same plan at different rates
/// let results = runner.run_rates(&[3.0, 5.0, 7.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_params: InvestmentParameters,
}

impl ScenarioRunner {
    pub fn new(base_params: InvestmentParameters) -> Self {
        Self { base_params }
    }

    /// Run the base parameters
    pub fn run(&self) -> InvestmentResult {
        ProjectionEngine::new(self.base_params.clone()).run()
    }

    /// Run several complete parameter sets in parallel, results in input order
    pub fn run_batch(&self, params: &[InvestmentParameters]) -> Vec<InvestmentResult> {
        params
            .par_iter()
            .map(|p| ProjectionEngine::new(p.clone()).run())
            .collect()
    }

    /// Base parameters at each stated rate (in the base rate unit)
    pub fn run_rates(&self, rates_pct: &[f64]) -> Vec<InvestmentResult> {
        let variations: Vec<_> = rates_pct
            .iter()
            .map(|&rate_pct| InvestmentParameters {
                rate_pct,
                ..self.base_params.clone()
            })
            .collect();
        self.run_batch(&variations)
    }

    /// Base parameters over each horizon in months
    pub fn run_horizons(&self, months: &[u32]) -> Vec<InvestmentResult> {
        let variations: Vec<_> = months
            .iter()
            .map(|&total_months| InvestmentParameters {
                total_months,
                ..self.base_params.clone()
            })
            .collect();
        self.run_batch(&variations)
    }

    pub fn params(&self) -> &InvestmentParameters {
        &self.base_params
    }

    pub fn params_mut(&mut self) -> &mut InvestmentParameters {
        &mut self.base_params
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(InvestmentParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::growth::future_value;
    use crate::projection::{CalculationMode, InvestmentSummary};
    use approx::assert_relative_eq;

    #[test]
    fn test_funding_scenarios_reach_target() {
        let rate = 0.07 / 12.0;
        let scenarios = funding_scenarios(100_000_000.0, 20_000_000.0, 300_000.0, rate, 120, 7.0);
        assert_eq!(scenarios.len(), 3);

        let initial_only = &scenarios[0];
        assert_eq!(initial_only.kind, ScenarioKind::InitialOnly);
        assert_relative_eq!(future_value(initial_only.initial, 0.0, rate, 120), 100_000_000.0, max_relative = 1e-9);

        let contribution_only = &scenarios[1];
        assert_eq!(contribution_only.initial, 0.0);
        assert_relative_eq!(
            future_value(0.0, contribution_only.monthly_contribution, rate, 120),
            100_000_000.0,
            max_relative = 1e-9
        );

        assert_eq!(scenarios[2].kind, ScenarioKind::CurrentPlan);
        assert_eq!(scenarios[2].initial, 20_000_000.0);
        assert!(scenarios.iter().all(|s| s.annual_rate_pct == 7.0));
    }

    #[test]
    fn test_zero_rate_scenarios() {
        let scenarios = funding_scenarios(1_200.0, 0.0, 0.0, 0.0, 12, 0.0);
        assert_eq!(scenarios[0].initial, 1_200.0);
        assert_eq!(scenarios[1].monthly_contribution, 100.0);
    }

    #[test]
    fn test_scenario_runner_rates() {
        let runner = ScenarioRunner::default();
        let results = runner.run_rates(&[3.0, 5.0, 7.0]);
        assert_eq!(results.len(), 3);

        // Higher rate should result in higher final balance
        assert!(results[2].final_balance() > results[1].final_balance());
        assert!(results[1].final_balance() > results[0].final_balance());
        assert_eq!(results[0].params.rate_pct, 3.0);
    }

    #[test]
    fn test_scenario_runner_horizons_present_value() {
        let mut runner = ScenarioRunner::default();
        runner.params_mut().mode = CalculationMode::PresentValue;
        runner.params_mut().amount = 100_000_000.0;

        let results = runner.run_horizons(&[60, 120, 240]);
        let required: Vec<f64> = results
            .iter()
            .map(|r| match &r.summary {
                InvestmentSummary::PresentValue(s) => s.required_initial,
                InvestmentSummary::FutureValue(_) => unreachable!(),
            })
            .collect();

        // Longer horizons need less up front
        assert!(required[0] > required[1]);
        assert!(required[1] >= required[2]);
    }
}
