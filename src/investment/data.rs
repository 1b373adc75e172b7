//! Investment parameter structures

use serde::{Deserialize, Serialize};

use crate::loan::LoanParameters;

/// Recurring annual holding costs of the property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurringCosts {
    /// Council rates, escalates with expense growth
    pub council_rates: f64,

    /// Water rates, escalates with expense growth
    pub water_rates: f64,

    /// Land tax, flat
    pub land_tax: f64,

    /// Strata / body corporate fees, escalates with expense growth
    pub strata_fees: f64,

    /// Landlord insurance, escalates with expense growth
    pub insurance: f64,

    /// Property manager fee as a fraction of rental income
    pub property_manager_rate: f64,

    /// Repairs and maintenance allowance, flat
    pub repairs_and_maintenance: f64,

    /// Non-cash depreciation deduction claimed each year
    pub depreciation: f64,
}

impl RecurringCosts {
    /// Sum of the items that grow with `annual_expense_increase`
    pub fn escalating_total(&self) -> f64 {
        self.council_rates + self.water_rates + self.strata_fees + self.insurance
    }

    /// Sum of the cash items that stay flat every year
    pub fn flat_total(&self) -> f64 {
        self.land_tax + self.repairs_and_maintenance
    }
}

impl Default for RecurringCosts {
    fn default() -> Self {
        Self {
            council_rates: 700.0,
            water_rates: 550.0,
            land_tax: 0.0,
            strata_fees: 500.0,
            insurance: 1250.0,
            property_manager_rate: 0.07,
            repairs_and_maintenance: 2000.0,
            depreciation: 7500.0,
        }
    }
}

/// Complete input set for an investment outlook
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentParameters {
    /// Loan used to fund the purchase
    pub loan: LoanParameters,

    /// Purchase value of the property
    pub property_value: f64,

    /// Investor's marginal tax rate (0-1)
    pub marginal_tax_rate: f64,

    /// Rent received per week in year 1
    pub weekly_rental_income: f64,

    /// Annual growth in rent
    pub annual_rental_increase: f64,

    /// Annual growth in escalating costs
    pub annual_expense_increase: f64,

    /// Annual capital growth of the property
    pub property_appreciation: f64,

    /// Holding costs
    pub costs: RecurringCosts,
}

impl InvestmentParameters {
    /// Copy of these parameters with the loan re-priced at `annual_rate`
    pub fn with_interest_rate(&self, annual_rate: f64) -> Self {
        let mut params = *self;
        params.loan.annual_rate = annual_rate;
        params
    }
}

impl Default for InvestmentParameters {
    /// Reference scenario: 500k property, 90% LVR, $400/week rent
    fn default() -> Self {
        Self {
            loan: LoanParameters::default(),
            property_value: 500_000.0,
            marginal_tax_rate: 0.32,
            weekly_rental_income: 400.0,
            annual_rental_increase: 0.02,
            annual_expense_increase: 0.02,
            property_appreciation: 0.04,
            costs: RecurringCosts::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_groupings() {
        let costs = RecurringCosts::default();
        assert_eq!(costs.escalating_total(), 700.0 + 550.0 + 500.0 + 1250.0);
        assert_eq!(costs.flat_total(), 2000.0);
    }

    #[test]
    fn test_with_interest_rate_leaves_original() {
        let base = InvestmentParameters::default();
        let repriced = base.with_interest_rate(0.08);
        assert_eq!(repriced.loan.annual_rate, 0.08);
        assert_eq!(base.loan.annual_rate, 0.0625);
        assert_eq!(repriced.property_value, base.property_value);
    }
}
