//! Investment projection engine: rates, closed-form growth and monthly trajectories

pub mod rates;
pub mod growth;
mod state;
mod engine;
mod trajectory;

pub use state::AccountState;
pub use engine::{
    CalculationMode, ContributionFrequency, FutureValueSummary, InvestmentParameters,
    InvestmentResult, InvestmentSummary, PresentValueSummary, ProjectionEngine,
    MAX_PROJECTION_MONTHS, MIN_PROJECTION_MONTHS,
};
pub use growth::{contribution_future_value, future_value, present_value};
pub use rates::{resolve_effective_monthly_rate, CompoundingFrequency, RateUnit};
pub use trajectory::{generate_trajectory, sample_rows, DisplayInterval, DisplayRow, ProjectionRow};
