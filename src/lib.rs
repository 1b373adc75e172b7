//! Investment Outlook - year-by-year projection for leveraged residential property
//!
//! This library provides:
//! - Fixed-payment loan amortization with early payoff handling
//! - Annual rental cash flow, holding costs and negative gearing tax effects
//! - Capital appreciation and final net gain/loss per year
//! - Batch scenario and interest-rate sensitivity runs

pub mod error;
pub mod loan;
pub mod investment;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{OutlookError, OutlookResult};
pub use loan::{compute_periodic_payment, generate_schedule, LoanParameters, PeriodRecord};
pub use investment::{InvestmentParameters, RecurringCosts};
pub use projection::{project, AnnualRecord, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::ScenarioRunner;
