//! Household data structures and batch loading

mod data;
pub mod loader;

pub use data::{AssetClass, AssetHoldings, AssetShare, CurrentCoverage, HouseholdProfile};
pub use loader::{load_households, load_households_from_reader, HouseholdRecord};
