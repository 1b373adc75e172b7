//! Core projection engine for annual investment outlooks

use log::{debug, info};

use super::cashflows::{AnnualRecord, ProjectionResult};
use crate::error::{OutlookError, OutlookResult};
use crate::investment::InvestmentParameters;
use crate::loan::{compute_periodic_payment, generate_schedule, PeriodRecord};

/// Weeks of rent collected per year
const WEEKS_PER_YEAR: f64 = 52.0;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of years to project; may run past the loan term
    pub horizon_years: u32,
}

impl ProjectionConfig {
    pub fn new(horizon_years: u32) -> Self {
        Self { horizon_years }
    }

    /// Horizon matching the loan term of `params`
    pub fn for_loan_term(params: &InvestmentParameters) -> Self {
        Self::new(params.loan.term_years)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { horizon_years: 30 }
    }
}

/// Interest and principal repaid in one projection year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct LoanYear {
    interest: f64,
    principal: f64,
}

/// Main projection engine
pub struct ProjectionEngine {
    params: InvestmentParameters,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given parameters and config
    pub fn new(params: InvestmentParameters, config: ProjectionConfig) -> Self {
        Self { params, config }
    }

    /// Run the projection
    pub fn run(&self) -> OutlookResult<ProjectionResult> {
        let horizon = self.config.horizon_years;
        if horizon < 1 {
            return Err(OutlookError::invalid("horizon_years", "must be at least 1"));
        }

        let loan = &self.params.loan;
        let periodic_payment = compute_periodic_payment(loan)?;
        let periods: Vec<PeriodRecord> = generate_schedule(loan, periodic_payment)?.collect();

        let ppy = loan.payments_per_year as usize;
        let loan_years = annual_loan_totals(&periods, ppy, horizon as usize);

        // Balance owed once the horizon's last repayment is made
        let horizon_periods = horizon as usize * ppy;
        let closing_loan_balance = if horizon_periods >= periods.len() {
            0.0
        } else {
            periods[horizon_periods - 1].balance
        };

        let records: Vec<AnnualRecord> = loan_years
            .iter()
            .enumerate()
            .map(|(i, loan_year)| self.project_year(i as u32, *loan_year))
            .collect();

        info!(
            "projected {} years: payment {:.2}, loan retired after {} periods",
            records.len(),
            periodic_payment,
            periods.len()
        );

        Ok(ProjectionResult {
            periodic_payment,
            payoff_periods: periods.len() as u32,
            payments_per_year: loan.payments_per_year,
            closing_property_value: self.property_value_at(horizon),
            closing_loan_balance,
            records,
        })
    }

    /// Property value after `years` of appreciation
    fn property_value_at(&self, years: u32) -> f64 {
        self.params.property_value * (1.0 + self.params.property_appreciation).powi(years as i32)
    }

    /// Build the row for 0-indexed projection year `i`
    fn project_year(&self, i: u32, loan_year: LoanYear) -> AnnualRecord {
        let p = &self.params;
        let costs = &p.costs;

        let rental_income = p.weekly_rental_income * WEEKS_PER_YEAR * (1.0 + p.annual_rental_increase).powi(i as i32);

        // Escalating costs compound on the 1-indexed year, one step ahead of rent
        let expense_growth = (1.0 + p.annual_expense_increase).powi(i as i32 + 1);
        let property_manager_fee = costs.property_manager_rate * rental_income;
        let other_expenses = costs.escalating_total() * expense_growth + costs.flat_total() + property_manager_fee;

        let total_cash_outflow = loan_year.interest + loan_year.principal + other_expenses;
        let net_cash_flow_before_tax = rental_income - total_cash_outflow;

        let taxable_income = rental_income - (loan_year.interest + other_expenses + costs.depreciation);
        let tax_benefit = -taxable_income * p.marginal_tax_rate;
        let net_cash_flow_after_tax = net_cash_flow_before_tax + tax_benefit;

        let capital_gain = self.property_value_at(i + 1) - self.property_value_at(i);

        debug!(
            "year {}: rent {:.2} interest {:.2} taxable {:.2} gain {:.2}",
            i + 1, rental_income, loan_year.interest, taxable_income, capital_gain
        );

        AnnualRecord {
            year: i + 1,
            rental_income,
            interest_paid: loan_year.interest,
            principal_paid: loan_year.principal,
            other_expenses,
            total_cash_outflow,
            net_cash_flow_before_tax,
            taxable_income,
            tax_benefit,
            net_cash_flow_after_tax,
            capital_gain,
            final_net_gain_loss: net_cash_flow_after_tax + capital_gain,
        }
    }
}

/// Sum repayment periods into `horizon` years of `payments_per_year` periods.
///
/// A trailing partial year holds the remainder periods of an early payoff;
/// years after the loan is retired are zero.
fn annual_loan_totals(periods: &[PeriodRecord], payments_per_year: usize, horizon: usize) -> Vec<LoanYear> {
    let mut years: Vec<LoanYear> = periods
        .chunks(payments_per_year)
        .take(horizon)
        .map(|chunk| LoanYear {
            interest: chunk.iter().map(|p| p.interest_portion).sum(),
            principal: chunk.iter().map(|p| p.principal_portion).sum(),
        })
        .collect();
    years.resize(horizon, LoanYear::default());
    years
}

/// Project `params` over `horizon_years` and return the annual table
pub fn project(params: &InvestmentParameters, horizon_years: u32) -> OutlookResult<Vec<AnnualRecord>> {
    let engine = ProjectionEngine::new(*params, ProjectionConfig::new(horizon_years));
    Ok(engine.run()?.records)
}
