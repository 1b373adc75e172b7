//! Annual output structures for projections

use serde::{Deserialize, Serialize};

/// One projected year of the investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualRecord {
    /// Projection year (1-indexed)
    pub year: u32,

    // Income
    pub rental_income: f64,

    // Loan flows summed over the year's repayment periods
    pub interest_paid: f64,
    pub principal_paid: f64,

    /// Holding costs plus property manager fee (no loan flows, no depreciation)
    pub other_expenses: f64,

    // Cash basis
    pub total_cash_outflow: f64,
    pub net_cash_flow_before_tax: f64,

    // Tax basis: principal excluded, depreciation deducted
    pub taxable_income: f64,
    /// Positive when the taxable loss reduces tax, negative when tax is owed
    pub tax_benefit: f64,
    pub net_cash_flow_after_tax: f64,

    // Property
    pub capital_gain: f64,

    // Summary
    pub final_net_gain_loss: f64,
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Fixed repayment per period
    pub periodic_payment: f64,

    /// Repayment periods needed to retire the loan
    pub payoff_periods: u32,

    /// Repayments per year, used to convert periods into years
    pub payments_per_year: u32,

    /// Property value at the end of the horizon
    pub closing_property_value: f64,

    /// Loan balance still owed at the end of the horizon
    pub closing_loan_balance: f64,

    /// Annual rows, year 1 first
    pub records: Vec<AnnualRecord>,
}

impl ProjectionResult {
    /// Year in which the loan is retired, if that happens inside the horizon
    pub fn payoff_year(&self) -> Option<u32> {
        let year = self.payoff_periods.div_ceil(self.payments_per_year);
        (year as usize <= self.records.len()).then_some(year)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total = |f: fn(&AnnualRecord) -> f64| -> f64 { self.records.iter().map(f).sum() };

        ProjectionSummary {
            years: self.records.len() as u32,
            periodic_payment: self.periodic_payment,
            total_rental_income: total(|r| r.rental_income),
            total_interest: total(|r| r.interest_paid),
            total_principal: total(|r| r.principal_paid),
            total_other_expenses: total(|r| r.other_expenses),
            total_tax_benefit: total(|r| r.tax_benefit),
            cumulative_cash_flow_before_tax: total(|r| r.net_cash_flow_before_tax),
            cumulative_cash_flow_after_tax: total(|r| r.net_cash_flow_after_tax),
            total_capital_gain: total(|r| r.capital_gain),
            total_net_gain_loss: total(|r| r.final_net_gain_loss),
            final_property_value: self.closing_property_value,
            payoff_year: self.payoff_year(),
            ending_equity: self.closing_property_value - self.closing_loan_balance,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub periodic_payment: f64,
    pub total_rental_income: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_other_expenses: f64,
    pub total_tax_benefit: f64,
    pub cumulative_cash_flow_before_tax: f64,
    pub cumulative_cash_flow_after_tax: f64,
    pub total_capital_gain: f64,
    pub total_net_gain_loss: f64,
    pub final_property_value: f64,
    pub payoff_year: Option<u32>,
    pub ending_equity: f64,
}
