//! Loan terms and the amortization engine

mod data;
mod amortization;

pub use data::{LoanParameters, PeriodRecord};
pub use amortization::{compute_periodic_payment, generate_schedule, AmortizationSchedule};
