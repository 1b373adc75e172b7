//! Fixed-payment amortization
//!
//! The periodic payment comes from the standard annuity formula; the schedule
//! then rolls the balance forward one period at a time, splitting each payment
//! into interest and principal until the loan is retired or the term ends.

use std::iter::FusedIterator;

use log::debug;

use super::data::{LoanParameters, PeriodRecord};
use crate::error::{OutlookError, OutlookResult};

/// Largest final-period residual, relative to the principal, treated as rounding
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Fixed periodic payment that retires `loan` over its full term.
///
/// Uses `P * r * (1+r)^n / ((1+r)^n - 1)` where `r` is the period rate and `n`
/// the number of periods. A zero rate is amortized flat as `P / n`.
pub fn compute_periodic_payment(loan: &LoanParameters) -> OutlookResult<f64> {
    loan.validate()?;

    let n = loan.total_periods() as f64;
    let r = loan.period_rate();

    let payment = if r == 0.0 {
        loan.principal / n
    } else {
        let growth = (1.0 + r).powf(n);
        loan.principal * r * growth / (growth - 1.0)
    };

    if !payment.is_finite() || payment <= 0.0 {
        return Err(OutlookError::invalid(
            "annual_rate",
            format!("annuity formula produced a non-finite payment ({})", payment),
        ));
    }

    debug!(
        "periodic payment {:.6} for principal {:.2} over {} periods at {:.8} per period",
        payment, loan.principal, loan.total_periods(), r
    );

    Ok(payment)
}

/// Build the amortization schedule for `loan` repaid at `periodic_payment`.
///
/// The payment must cover at least the first period's interest, otherwise the
/// balance would grow instead of amortizing.
pub fn generate_schedule(loan: &LoanParameters, periodic_payment: f64) -> OutlookResult<AmortizationSchedule> {
    loan.validate()?;

    if !periodic_payment.is_finite() || periodic_payment <= 0.0 {
        return Err(OutlookError::invalid(
            "periodic_payment",
            format!("must be a positive amount, got {}", periodic_payment),
        ));
    }

    let first_interest = loan.principal * loan.period_rate();
    if periodic_payment <= first_interest {
        return Err(OutlookError::invalid(
            "periodic_payment",
            format!(
                "{:.2} does not cover the first period's interest of {:.2}",
                periodic_payment, first_interest
            ),
        ));
    }

    Ok(AmortizationSchedule {
        period_rate: loan.period_rate(),
        payment: periodic_payment,
        balance: loan.principal,
        total_periods: loan.total_periods(),
        residual_tolerance: loan.principal * RESIDUAL_TOLERANCE,
        periods_emitted: 0,
        retired: false,
    })
}

/// Lazily generated sequence of repayment periods.
///
/// Yields exactly `min(contractual periods, periods to payoff)` records and
/// cannot be restarted; call [`generate_schedule`] again for a fresh pass.
/// A payment too small to retire the loan over the term leaves the unpaid
/// balance in [`AmortizationSchedule::outstanding_balance`].
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    period_rate: f64,
    payment: f64,
    balance: f64,
    total_periods: u32,
    residual_tolerance: f64,
    periods_emitted: u32,
    retired: bool,
}

impl AmortizationSchedule {
    /// Balance still owed after the periods yielded so far
    pub fn outstanding_balance(&self) -> f64 {
        self.balance
    }
}

impl Iterator for AmortizationSchedule {
    type Item = PeriodRecord;

    fn next(&mut self) -> Option<PeriodRecord> {
        if self.retired || self.periods_emitted >= self.total_periods {
            return None;
        }
        self.periods_emitted += 1;

        let interest = self.balance * self.period_rate;
        let mut principal = self.payment - interest;
        let remaining = self.balance - principal;

        let rounding_residual = self.periods_emitted == self.total_periods
            && remaining <= self.residual_tolerance;

        let payment_amount = if remaining < 0.0 || rounding_residual {
            // Overshoot is handed back; rounding dust on the last period is swept in
            principal += remaining;
            self.balance = 0.0;
            self.retired = true;
            interest + principal
        } else {
            self.balance = remaining;
            self.payment
        };

        Some(PeriodRecord {
            period: self.periods_emitted,
            payment_amount,
            interest_portion: interest,
            principal_portion: principal,
            balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.retired {
            return (0, Some(0));
        }
        let left = (self.total_periods - self.periods_emitted) as usize;
        (left.min(1), Some(left))
    }
}

impl FusedIterator for AmortizationSchedule {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_loan() -> LoanParameters {
        LoanParameters::new(450_000.0, 0.0625, 30, 52)
    }

    #[test]
    fn test_weekly_reference_payment() {
        let loan = reference_loan();
        let payment = compute_periodic_payment(&loan).unwrap();

        // Must exceed the first week's interest and stay well under a 10-year payment
        assert!(payment > 450_000.0 * 0.0625 / 52.0);
        assert!(payment < 450_000.0 / 520.0);
    }

    #[test]
    fn test_monthly_payment_known_value() {
        // 200k over 30 years at 6% monthly is the textbook 1199.10
        let loan = LoanParameters::new(200_000.0, 0.06, 30, 12);
        let payment = compute_periodic_payment(&loan).unwrap();
        assert_abs_diff_eq!(payment, 1199.10, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_is_flat() {
        let loan = LoanParameters::new(12_000.0, 0.0, 1, 12);
        let payment = compute_periodic_payment(&loan).unwrap();
        assert_relative_eq!(payment, 1000.0);

        let periods: Vec<_> = generate_schedule(&loan, payment).unwrap().collect();
        assert_eq!(periods.len(), 12);
        assert!(periods.iter().all(|p| p.interest_portion == 0.0));
        assert_eq!(periods.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_invalid_terms_rejected() {
        assert!(compute_periodic_payment(&LoanParameters::new(0.0, 0.05, 30, 12)).is_err());
        assert!(compute_periodic_payment(&LoanParameters::new(1000.0, 0.05, 0, 12)).is_err());
        assert!(compute_periodic_payment(&LoanParameters::new(1000.0, 0.05, 30, 0)).is_err());
        assert!(compute_periodic_payment(&LoanParameters::new(1000.0, -0.05, 30, 12)).is_err());
    }

    #[test]
    fn test_reference_schedule_retires_principal() {
        let loan = reference_loan();
        let payment = compute_periodic_payment(&loan).unwrap();
        let periods: Vec<_> = generate_schedule(&loan, payment).unwrap().collect();

        assert_eq!(periods.len(), 1560);

        let total_principal: f64 = periods.iter().map(|p| p.principal_portion).sum();
        assert_relative_eq!(total_principal, 450_000.0, max_relative = 1e-9);
        assert_eq!(periods.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_payment_splits_and_balance_floor() {
        let loan = LoanParameters::new(250_000.0, 0.055, 25, 12);
        let payment = compute_periodic_payment(&loan).unwrap();

        for p in generate_schedule(&loan, payment).unwrap() {
            assert_relative_eq!(p.payment_amount, p.interest_portion + p.principal_portion, max_relative = 1e-12);
            assert!(p.balance >= 0.0);
            assert!(p.interest_portion >= 0.0);
            assert!(p.principal_portion >= 0.0);
        }
    }

    #[test]
    fn test_overpayment_retires_early() {
        let loan = LoanParameters::new(1000.0, 0.0, 1, 12);
        let periods: Vec<_> = generate_schedule(&loan, 300.0).unwrap().collect();

        assert_eq!(periods.len(), 4);
        let last = periods.last().unwrap();
        assert_relative_eq!(last.principal_portion, 100.0);
        assert_relative_eq!(last.payment_amount, 100.0);
        assert_eq!(last.balance, 0.0);
        assert!(periods[..3].iter().all(|p| p.payment_amount == 300.0));
    }

    #[test]
    fn test_schedule_is_not_restartable() {
        let loan = LoanParameters::new(1000.0, 0.0, 1, 4);
        let mut schedule = generate_schedule(&loan, 250.0).unwrap();

        assert_eq!(schedule.size_hint(), (1, Some(4)));
        assert_eq!(schedule.by_ref().count(), 4);
        assert!(schedule.next().is_none());
        assert_eq!(schedule.outstanding_balance(), 0.0);
    }

    #[test]
    fn test_underpayment_leaves_balance_owing() {
        let loan = LoanParameters::new(10_000.0, 0.12, 1, 12);
        let mut schedule = generate_schedule(&loan, 200.0).unwrap();
        let periods: Vec<_> = schedule.by_ref().collect();

        assert_eq!(periods.len(), 12);
        let last = periods.last().unwrap();
        assert_eq!(last.payment_amount, 200.0);
        assert!(last.principal_portion > 0.0 && last.principal_portion < 200.0);
        assert!(last.balance > 8000.0);
        assert_eq!(schedule.outstanding_balance(), last.balance);
    }

    #[test]
    fn test_period_count_overflow_rejected() {
        let loan = LoanParameters::new(1000.0, 0.05, 100_000, 100_000);
        let err = compute_periodic_payment(&loan).unwrap_err();
        assert!(matches!(err, OutlookError::InvalidInput { ref field, .. } if field == "payments_per_year"));
        assert!(generate_schedule(&loan, 100.0).is_err());
    }

    #[test]
    fn test_payment_must_cover_interest() {
        let loan = LoanParameters::new(100_000.0, 0.12, 10, 12);
        // First month's interest is exactly 1000
        assert!(generate_schedule(&loan, 1000.0).is_err());
        assert!(generate_schedule(&loan, 0.0).is_err());
        assert!(generate_schedule(&loan, f64::INFINITY).is_err());
    }
}
