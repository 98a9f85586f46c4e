//! Month-by-month account trajectory and its display sampling

use serde::{Deserialize, Serialize};

use super::engine::ContributionFrequency;
use super::state::AccountState;

/// A single row of the trajectory for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub month: u32,
    /// Cumulative principal paid in
    pub invested: f64,
    /// balance - invested
    pub gain: f64,
    pub balance: f64,
}

impl ProjectionRow {
    fn from_state(state: &AccountState) -> Self {
        Self {
            month: state.month,
            invested: state.invested,
            gain: state.gain(),
            balance: state.balance,
        }
    }
}

/// Simulate the account month by month, months 0 through `total_months`.
///
/// `monthly_contribution` is the monthly equivalent; with annual contributions
/// twelve of them are paid at once in the first month of each year.
pub fn generate_trajectory(
    initial: f64,
    monthly_contribution: f64,
    monthly_rate: f64,
    total_months: u32,
    frequency: ContributionFrequency,
) -> Vec<ProjectionRow> {
    let mut state = AccountState::from_initial(initial);
    let mut rows = Vec::with_capacity(total_months as usize + 1);
    rows.push(ProjectionRow::from_state(&state));

    for month in 1..=total_months {
        let contribution = frequency.contribution_due(month, monthly_contribution);
        state.advance_month(monthly_rate, contribution);
        rows.push(ProjectionRow::from_state(&state));
    }

    rows
}

/// Granularity of the displayed trajectory table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayInterval {
    Yearly,
    Quarterly,
    Monthly,
}

impl DisplayInterval {
    pub fn months(&self) -> u32 {
        match self {
            DisplayInterval::Yearly => 12,
            DisplayInterval::Quarterly => 3,
            DisplayInterval::Monthly => 1,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            DisplayInterval::Yearly => "year",
            DisplayInterval::Quarterly => "quarter",
            DisplayInterval::Monthly => "month",
        }
    }
}

/// Trajectory row labelled with its display period
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub period: u32,
    pub unit: &'static str,
    pub invested: f64,
    pub gain: f64,
    pub balance: f64,
}

/// Rows falling on interval boundaries (month 0 included)
pub fn sample_rows(rows: &[ProjectionRow], interval: DisplayInterval) -> Vec<DisplayRow> {
    let step = interval.months();
    rows.iter()
        .filter(|r| r.month % step == 0)
        .map(|r| DisplayRow {
            period: r.month / step,
            unit: interval.unit(),
            invested: r.invested,
            gain: r.gain,
            balance: r.balance,
        })
        .collect()
}
