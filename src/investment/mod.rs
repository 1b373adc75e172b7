//! Property, market and tax inputs plus scenario loading

mod data;
pub mod loader;

pub use data::{InvestmentParameters, RecurringCosts};
pub use loader::{load_parameters, load_parameters_from_reader, load_scenarios, load_scenarios_from_reader};
