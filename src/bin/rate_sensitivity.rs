//! Interest-rate sensitivity of the investment outlook
//!
//! Re-prices the loan across a range of rates and writes one summary row per rate

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use investment_outlook::investment::load_parameters;
use investment_outlook::report::write_summaries;
use investment_outlook::scenario::rate_steps;
use investment_outlook::{InvestmentParameters, ProjectionConfig, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "rate_sensitivity", about = "Sweep loan interest rates")]
struct Args {
    /// JSON parameter file; omitted fields use the reference scenario
    #[arg(long)]
    params: Option<PathBuf>,

    /// Years to project (defaults to the loan term)
    #[arg(long)]
    horizon: Option<u32>,

    #[arg(long, default_value_t = 0.04)]
    from: f64,

    #[arg(long, default_value_t = 0.09)]
    to: f64,

    #[arg(long, default_value_t = 0.0025)]
    step: f64,

    #[arg(long, default_value = "rate_sensitivity.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let params = match &args.params {
        Some(path) => load_parameters(path)
            .with_context(|| format!("reading parameters from {}", path.display()))?,
        None => InvestmentParameters::default(),
    };
    let config = match args.horizon {
        Some(years) => ProjectionConfig::new(years),
        None => ProjectionConfig::for_loan_term(&params),
    };

    let rates = rate_steps(args.from, args.to, args.step).context("invalid rate range")?;
    println!("Running {} rates over {} years...", rates.len(), config.horizon_years);

    let runner = ScenarioRunner::with_parameters(params);
    let sweep = runner.run_rate_sweep(&rates, &config).context("rate sweep failed")?;

    let summaries: Vec<_> = sweep
        .iter()
        .map(|(rate, result)| (format!("{:.4}", rate), result.summary()))
        .collect();

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_summaries(file, &summaries)?;

    println!("{:>8} {:>12} {:>14} {:>16}", "Rate", "Payment", "Interest", "Net Gain/Loss");
    for (label, s) in &summaries {
        println!("{:>8} {:>12.2} {:>14.2} {:>16.2}", label, s.periodic_payment, s.total_interest, s.total_net_gain_loss);
    }

    println!("\nOutput written to {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
