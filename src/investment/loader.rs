//! Load investment parameters from JSON files and scenario CSVs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::Reader;
use log::info;

use super::{InvestmentParameters, RecurringCosts};
use crate::error::OutlookResult;
use crate::loan::LoanParameters;

/// Raw CSV row, one scenario per line, columns named after the calculator inputs
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Scenario")]
    scenario: String,
    #[serde(rename = "PropertyValue")]
    property_value: f64,
    #[serde(rename = "LoanAmount")]
    loan_amount: f64,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "LoanTerm")]
    loan_term: u32,
    #[serde(rename = "PaymentFrequency")]
    payment_frequency: u32,
    #[serde(rename = "MarginalTaxRate")]
    marginal_tax_rate: f64,
    #[serde(rename = "WeeklyRentalIncome")]
    weekly_rental_income: f64,
    #[serde(rename = "AnnualRentalIncrease")]
    annual_rental_increase: f64,
    #[serde(rename = "AnnualExpenseIncrease")]
    annual_expense_increase: f64,
    #[serde(rename = "PropertyAppreciation")]
    property_appreciation: f64,
    #[serde(rename = "CouncilRates")]
    council_rates: f64,
    #[serde(rename = "WaterRates")]
    water_rates: f64,
    #[serde(rename = "LandTax")]
    land_tax: f64,
    #[serde(rename = "StrataFees")]
    strata_fees: f64,
    #[serde(rename = "Insurance")]
    insurance: f64,
    #[serde(rename = "PropertyManagerRate")]
    property_manager_rate: f64,
    #[serde(rename = "RepairsAndMaintenance")]
    repairs_and_maintenance: f64,
    #[serde(rename = "Depreciation")]
    depreciation: f64,
}

impl CsvRow {
    fn into_scenario(self) -> (String, InvestmentParameters) {
        let params = InvestmentParameters {
            loan: LoanParameters::new(
                self.loan_amount,
                self.interest_rate,
                self.loan_term,
                self.payment_frequency,
            ),
            property_value: self.property_value,
            marginal_tax_rate: self.marginal_tax_rate,
            weekly_rental_income: self.weekly_rental_income,
            annual_rental_increase: self.annual_rental_increase,
            annual_expense_increase: self.annual_expense_increase,
            property_appreciation: self.property_appreciation,
            costs: RecurringCosts {
                council_rates: self.council_rates,
                water_rates: self.water_rates,
                land_tax: self.land_tax,
                strata_fees: self.strata_fees,
                insurance: self.insurance,
                property_manager_rate: self.property_manager_rate,
                repairs_and_maintenance: self.repairs_and_maintenance,
                depreciation: self.depreciation,
            },
        };
        (self.scenario, params)
    }
}

/// Load labelled scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> OutlookResult<Vec<(String, InvestmentParameters)>> {
    let file = File::open(path.as_ref())?;
    let scenarios = load_scenarios_from_reader(file)?;
    info!("loaded {} scenarios from {}", scenarios.len(), path.as_ref().display());
    Ok(scenarios)
}

/// Load labelled scenarios from any reader
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> OutlookResult<Vec<(String, InvestmentParameters)>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario());
    }

    Ok(scenarios)
}

/// Load a JSON parameter file; omitted fields take the reference scenario's values
pub fn load_parameters<P: AsRef<Path>>(path: P) -> OutlookResult<InvestmentParameters> {
    let file = File::open(path.as_ref())?;
    let params = load_parameters_from_reader(BufReader::new(file))?;
    info!("loaded parameters from {}", path.as_ref().display());
    Ok(params)
}

/// Load JSON parameters from any reader
pub fn load_parameters_from_reader<R: Read>(reader: R) -> OutlookResult<InvestmentParameters> {
    Ok(serde_json::from_reader(reader)?)
}
