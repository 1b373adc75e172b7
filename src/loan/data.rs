//! Loan data structures

use serde::{Deserialize, Serialize};

use crate::error::{OutlookError, OutlookResult};

/// Terms of an amortizing loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanParameters {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual interest rate as a fraction (0.0625 = 6.25%)
    pub annual_rate: f64,

    /// Contractual term in years
    pub term_years: u32,

    /// Repayments per year (12 = monthly, 26 = fortnightly, 52 = weekly)
    pub payments_per_year: u32,
}

impl LoanParameters {
    pub fn new(principal: f64, annual_rate: f64, term_years: u32, payments_per_year: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
            payments_per_year,
        }
    }

    /// Interest rate applied each repayment period
    pub fn period_rate(&self) -> f64 {
        self.annual_rate / self.payments_per_year as f64
    }

    /// Number of contractual repayment periods, saturating on overflow
    /// (`validate` rejects terms that overflow)
    pub fn total_periods(&self) -> u32 {
        self.term_years.saturating_mul(self.payments_per_year)
    }

    /// Reject terms the amortization formulas cannot handle
    pub fn validate(&self) -> OutlookResult<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(OutlookError::invalid(
                "principal",
                format!("must be a positive amount, got {}", self.principal),
            ));
        }
        if self.term_years == 0 {
            return Err(OutlookError::invalid("term_years", "must be at least 1"));
        }
        if self.payments_per_year == 0 {
            return Err(OutlookError::invalid("payments_per_year", "must be at least 1"));
        }
        if self.term_years.checked_mul(self.payments_per_year).is_none() {
            return Err(OutlookError::invalid(
                "payments_per_year",
                format!(
                    "{} years of {} payments exceeds the supported period count",
                    self.term_years, self.payments_per_year
                ),
            ));
        }
        if !self.annual_rate.is_finite() || self.annual_rate < 0.0 {
            return Err(OutlookError::invalid(
                "annual_rate",
                format!("must be zero or positive, got {}", self.annual_rate),
            ));
        }
        Ok(())
    }
}

impl Default for LoanParameters {
    /// 450k over 30 years at 6.25%, repaid weekly
    fn default() -> Self {
        Self::new(450_000.0, 0.0625, 30, 52)
    }
}

/// One repayment period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Period number (1-indexed)
    pub period: u32,

    /// Amount paid this period
    pub payment_amount: f64,

    /// Portion of the payment covering accrued interest
    pub interest_portion: f64,

    /// Portion of the payment retiring principal
    pub principal_portion: f64,

    /// Loan balance after this period's payment
    pub balance: f64,
}
