//! Report output: annual table as CSV or console text, and scenario summaries

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::OutlookResult;
use crate::projection::{AnnualRecord, ProjectionSummary};

/// Column headers of the annual report, in output order
pub const REPORT_HEADERS: [&str; 12] = [
    "Year",
    "Rental Income",
    "Interest Payment",
    "Principal Payment",
    "Other Expenses",
    "Total Cash Outflows",
    "Net Cash Flow Before Tax",
    "Taxable Income",
    "Tax Benefit",
    "Net Cash Flow After Tax",
    "Capital Gains",
    "Final Net Gain/Loss",
];

/// Column headers of the per-scenario summary report
pub const SUMMARY_HEADERS: [&str; 15] = [
    "Scenario",
    "Years",
    "PeriodicPayment",
    "TotalRentalIncome",
    "TotalInterest",
    "TotalPrincipal",
    "TotalOtherExpenses",
    "TotalTaxBenefit",
    "CashFlowBeforeTax",
    "CashFlowAfterTax",
    "TotalCapitalGain",
    "TotalNetGainLoss",
    "FinalPropertyValue",
    "PayoffYear",
    "EndingEquity",
];

fn report_fields(r: &AnnualRecord) -> [String; 12] {
    [
        r.year.to_string(),
        format!("{:.2}", r.rental_income),
        format!("{:.2}", r.interest_paid),
        format!("{:.2}", r.principal_paid),
        format!("{:.2}", r.other_expenses),
        format!("{:.2}", r.total_cash_outflow),
        format!("{:.2}", r.net_cash_flow_before_tax),
        format!("{:.2}", r.taxable_income),
        format!("{:.2}", r.tax_benefit),
        format!("{:.2}", r.net_cash_flow_after_tax),
        format!("{:.2}", r.capital_gain),
        format!("{:.2}", r.final_net_gain_loss),
    ]
}

/// Write the annual table as CSV, one row per year
pub fn write_report<W: Write>(writer: W, records: &[AnnualRecord]) -> OutlookResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(REPORT_HEADERS)?;
    for record in records {
        wtr.write_record(report_fields(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the annual table to a CSV file
pub fn write_report_file<P: AsRef<Path>>(path: P, records: &[AnnualRecord]) -> OutlookResult<()> {
    let file = File::create(path)?;
    write_report(file, records)
}

/// Write one summary row per labelled scenario
pub fn write_summaries<W: Write>(writer: W, summaries: &[(String, ProjectionSummary)]) -> OutlookResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SUMMARY_HEADERS)?;
    for (label, s) in summaries {
        wtr.write_record([
            label.clone(),
            s.years.to_string(),
            format!("{:.2}", s.periodic_payment),
            format!("{:.2}", s.total_rental_income),
            format!("{:.2}", s.total_interest),
            format!("{:.2}", s.total_principal),
            format!("{:.2}", s.total_other_expenses),
            format!("{:.2}", s.total_tax_benefit),
            format!("{:.2}", s.cumulative_cash_flow_before_tax),
            format!("{:.2}", s.cumulative_cash_flow_after_tax),
            format!("{:.2}", s.total_capital_gain),
            format!("{:.2}", s.total_net_gain_loss),
            format!("{:.2}", s.final_property_value),
            s.payoff_year.map(|y| y.to_string()).unwrap_or_default(),
            format!("{:.2}", s.ending_equity),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Fixed-width console table of the first `max_rows` years
pub fn format_table(records: &[AnnualRecord], max_rows: usize) -> String {
    let mut out = format!(
        "{:>4} {:>11} {:>11} {:>11} {:>11} {:>12} {:>12} {:>12} {:>11} {:>12} {:>11} {:>12}\n",
        "Year", "Rent", "Interest", "Principal", "Other", "Outflows", "CF pre-tax", "Taxable", "Tax ben.",
        "CF post-tax", "Cap. gain", "Net gain"
    );
    out.push_str(&"-".repeat(143));
    out.push('\n');

    for r in records.iter().take(max_rows) {
        out.push_str(&format!(
            "{:>4} {:>11.2} {:>11.2} {:>11.2} {:>11.2} {:>12.2} {:>12.2} {:>12.2} {:>11.2} {:>12.2} {:>11.2} {:>12.2}\n",
            r.year,
            r.rental_income,
            r.interest_paid,
            r.principal_paid,
            r.other_expenses,
            r.total_cash_outflow,
            r.net_cash_flow_before_tax,
            r.taxable_income,
            r.tax_benefit,
            r.net_cash_flow_after_tax,
            r.capital_gain,
            r.final_net_gain_loss,
        ));
    }

    if records.len() > max_rows {
        out.push_str(&format!("... ({} more years)\n", records.len() - max_rows));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investment::InvestmentParameters;
    use crate::projection::{project, ProjectionConfig, ProjectionEngine};

    #[test]
    fn test_report_has_header_and_one_row_per_year() {
        let records = project(&InvestmentParameters::default(), 5).unwrap();
        let mut buf = Vec::new();
        write_report(&mut buf, &records).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], REPORT_HEADERS.join(","));
        assert!(lines[1].starts_with("1,20800.00,"));
        assert!(lines[5].starts_with("5,"));
    }

    #[test]
    fn test_report_reads_back() {
        let records = project(&InvestmentParameters::default(), 3).unwrap();
        let mut buf = Vec::new();
        write_report(&mut buf, &records).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 12);
        assert_eq!(&headers[11], "Final Net Gain/Loss");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        let capital_gain: f64 = rows[0][10].parse().unwrap();
        assert!((capital_gain - 20_000.0).abs() < 0.005);
    }

    #[test]
    fn test_summary_rows() {
        let result = ProjectionEngine::new(InvestmentParameters::default(), ProjectionConfig::new(10))
            .run()
            .unwrap();
        let mut buf = Vec::new();
        write_summaries(&mut buf, &[("base".to_string(), result.summary())]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), SUMMARY_HEADERS.len());
        assert_eq!(fields[0], "base");
        assert_eq!(fields[1], "10");
        // Loan still running at year 10
        assert_eq!(fields[13], "");
    }

    #[test]
    fn test_table_truncates() {
        let records = project(&InvestmentParameters::default(), 12).unwrap();
        let table = format_table(&records, 10);
        assert_eq!(table.lines().count(), 2 + 10 + 1);
        assert!(table.ends_with("... (2 more years)\n"));
    }
}
