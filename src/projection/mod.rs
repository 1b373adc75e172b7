//! Annual investment projection built on the amortization schedule

mod engine;
mod cashflows;

pub use engine::{project, ProjectionEngine, ProjectionConfig};
pub use cashflows::{AnnualRecord, ProjectionResult, ProjectionSummary};
