//! Project every scenario in a CSV file and write a summary per scenario

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use investment_outlook::investment::load_scenarios;
use investment_outlook::report::write_summaries;
use investment_outlook::{ProjectionConfig, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "run_scenarios", about = "Batch-project scenarios from CSV")]
struct Args {
    /// Scenario CSV, one parameter set per row
    scenarios: PathBuf,

    /// Years to project for every scenario
    #[arg(long, default_value_t = 30)]
    horizon: u32,

    #[arg(long, default_value = "scenario_summary.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let scenarios = load_scenarios(&args.scenarios)
        .with_context(|| format!("loading scenarios from {}", args.scenarios.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let config = ProjectionConfig::new(args.horizon);
    let outcomes = ScenarioRunner::run_batch(&scenarios, &config);

    let mut summaries = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome.result {
            Ok(result) => summaries.push((outcome.label, result.summary())),
            Err(e) => eprintln!("Skipping scenario {}: {}", outcome.label, e),
        }
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_summaries(file, &summaries)?;

    println!("Wrote {} scenario summaries to {}", summaries.len(), args.output.display());
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
