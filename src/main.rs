//! Investment Outlook CLI
//!
//! Projects a leveraged property investment year by year and prints the table

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use investment_outlook::investment::load_parameters;
use investment_outlook::report::{format_table, write_report_file};
use investment_outlook::{InvestmentParameters, ProjectionConfig, ProjectionEngine};

/// Year-by-year outlook for a negatively geared property investment
#[derive(Parser, Debug)]
#[command(name = "investment_outlook", version, about)]
struct Cli {
    /// JSON parameter file; omitted fields use the reference scenario
    #[arg(long)]
    params: Option<PathBuf>,

    /// Years to project (defaults to the loan term)
    #[arg(long)]
    horizon: Option<u32>,

    /// Override the loan's annual interest rate (e.g. 0.0625)
    #[arg(long)]
    interest_rate: Option<f64>,

    /// Override the amount borrowed
    #[arg(long)]
    loan_amount: Option<f64>,

    /// Override the weekly rent
    #[arg(long)]
    weekly_rent: Option<f64>,

    /// Write the annual report to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Rows of the annual table to print
    #[arg(long, default_value_t = 40)]
    rows: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut params = match &cli.params {
        Some(path) => load_parameters(path)
            .with_context(|| format!("reading parameters from {}", path.display()))?,
        None => InvestmentParameters::default(),
    };
    if let Some(rate) = cli.interest_rate {
        params.loan.annual_rate = rate;
    }
    if let Some(amount) = cli.loan_amount {
        params.loan.principal = amount;
    }
    if let Some(rent) = cli.weekly_rent {
        params.weekly_rental_income = rent;
    }

    let config = match cli.horizon {
        Some(years) => ProjectionConfig::new(years),
        None => ProjectionConfig::for_loan_term(&params),
    };
    info!("projecting {} years", config.horizon_years);

    let result = ProjectionEngine::new(params, config)
        .run()
        .context("projection failed")?;

    if let Some(path) = &cli.output {
        write_report_file(path, &result.records)
            .with_context(|| format!("writing report to {}", path.display()))?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Investment Outlook v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");
    println!("Property: ${:.2}  Loan: ${:.2} at {:.4}% over {} years ({} payments/yr)",
        params.property_value,
        params.loan.principal,
        params.loan.annual_rate * 100.0,
        params.loan.term_years,
        params.loan.payments_per_year,
    );
    println!("Periodic payment: ${:.2}\n", result.periodic_payment);

    print!("{}", format_table(&result.records, cli.rows));

    if let Some(path) = &cli.output {
        println!("\nFull results written to: {}", path.display());
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Years: {}", summary.years);
    println!("  Total Rental Income: ${:.2}", summary.total_rental_income);
    println!("  Total Interest: ${:.2}", summary.total_interest);
    println!("  Total Tax Benefit: ${:.2}", summary.total_tax_benefit);
    println!("  Cash Flow After Tax: ${:.2}", summary.cumulative_cash_flow_after_tax);
    println!("  Total Capital Gain: ${:.2}", summary.total_capital_gain);
    println!("  Total Net Gain/Loss: ${:.2}", summary.total_net_gain_loss);
    match summary.payoff_year {
        Some(year) => println!("  Loan Retired: year {}", year),
        None => println!("  Loan Retired: beyond horizon"),
    }
    println!("  Ending Equity: ${:.2}", summary.ending_equity);

    Ok(())
}
