//! Household Planner - insurance needs and investment projection calculators
//!
//! This library provides:
//! - Required life, income replacement and critical illness cover for a household
//! - Coverage gap analysis, risk ratios and recommendations
//! - Future value and present value of an initial amount plus contributions
//! - Month-by-month account trajectories and alternative funding scenarios
//! - Boundary parsing of raw text input with explicit default substitution

pub mod household;
pub mod assumptions;
pub mod insurance;
pub mod projection;
pub mod scenario;
pub mod input;
pub mod ratio;

// Re-export commonly used types
pub use household::{AssetHoldings, CurrentCoverage, HouseholdProfile};
pub use assumptions::NeedsAssumptions;
pub use insurance::{compute_coverage_needs, CoverageCategory, CoverageNeeds, InsuranceReport};
pub use projection::{InvestmentParameters, InvestmentResult, ProjectionEngine, ProjectionRow};
pub use scenario::ScenarioRunner;
