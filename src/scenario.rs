//! Scenario runner for batch and sensitivity projections
//!
//! Each projection owns its inputs, so batches fan out over the rayon pool
//! without any shared state.

use log::{info, warn};
use rayon::prelude::*;

use crate::error::{OutlookError, OutlookResult};
use crate::investment::InvestmentParameters;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Outcome of one labelled scenario in a batch
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub label: String,
    pub result: OutlookResult<ProjectionResult>,
}

/// Runs projections for one base parameter set and its variations
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_params: InvestmentParameters,
}

impl ScenarioRunner {
    /// Create runner around the reference scenario
    pub fn new() -> Self {
        Self::with_parameters(InvestmentParameters::default())
    }

    pub fn with_parameters(params: InvestmentParameters) -> Self {
        Self { base_params: params }
    }

    /// Project the base parameters with the given config
    pub fn run(&self, config: ProjectionConfig) -> OutlookResult<ProjectionResult> {
        ProjectionEngine::new(self.base_params, config).run()
    }

    /// Project every labelled scenario in parallel, preserving input order.
    ///
    /// A failing scenario does not stop the batch; its error is kept in the outcome.
    pub fn run_batch(
        scenarios: &[(String, InvestmentParameters)],
        config: &ProjectionConfig,
    ) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = scenarios
            .par_iter()
            .map(|(label, params)| {
                let result = ProjectionEngine::new(*params, config.clone()).run();
                if let Err(ref e) = result {
                    warn!("scenario {} failed: {}", label, e);
                }
                ScenarioOutcome {
                    label: label.clone(),
                    result,
                }
            })
            .collect();

        info!("ran {} scenarios over {} years", outcomes.len(), config.horizon_years);
        outcomes
    }

    /// Re-price the base loan at each rate and project, preserving rate order
    pub fn run_rate_sweep(
        &self,
        rates: &[f64],
        config: &ProjectionConfig,
    ) -> OutlookResult<Vec<(f64, ProjectionResult)>> {
        rates
            .par_iter()
            .map(|&rate| {
                let params = self.base_params.with_interest_rate(rate);
                ProjectionEngine::new(params, config.clone())
                    .run()
                    .map(|result| (rate, result))
            })
            .collect()
    }

    /// Get reference to base parameters
    pub fn parameters(&self) -> &InvestmentParameters {
        &self.base_params
    }

    /// Get mutable reference to base parameters for customization
    pub fn parameters_mut(&mut self) -> &mut InvestmentParameters {
        &mut self.base_params
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Evenly spaced rates from `start` to `end` inclusive
pub fn rate_steps(start: f64, end: f64, step: f64) -> OutlookResult<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(OutlookError::invalid("step", format!("must be positive, got {}", step)));
    }
    if !start.is_finite() || !end.is_finite() || end < start {
        return Err(OutlookError::invalid(
            "end",
            format!("rate range {} to {} is empty", start, end),
        ));
    }
    let count = ((end - start) / step + 1e-9).floor() as usize;
    Ok((0..=count).map(|k| start + step * k as f64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::LoanParameters;
    use approx::assert_relative_eq;

    #[test]
    fn test_higher_rate_costs_more_interest() {
        let runner = ScenarioRunner::new();
        let config = ProjectionConfig::new(30);

        let sweep = runner.run_rate_sweep(&[0.04, 0.05, 0.06], &config).unwrap();
        assert_eq!(sweep.len(), 3);
        assert_eq!(sweep[0].0, 0.04);
        assert_eq!(sweep[2].0, 0.06);

        let interest: Vec<f64> = sweep.iter().map(|(_, r)| r.summary().total_interest).collect();
        assert!(interest[0] < interest[1]);
        assert!(interest[1] < interest[2]);
    }

    #[test]
    fn test_sweep_fails_on_negative_rate() {
        let runner = ScenarioRunner::new();
        assert!(runner.run_rate_sweep(&[0.05, -0.01], &ProjectionConfig::new(10)).is_err());
    }

    #[test]
    fn test_batch_keeps_order_and_failures() {
        let good = InvestmentParameters::default();
        let bad = InvestmentParameters {
            loan: LoanParameters::new(0.0, 0.05, 30, 12),
            ..good
        };
        let scenarios = vec![
            ("base".to_string(), good),
            ("no-loan".to_string(), bad),
            ("shorter".to_string(), InvestmentParameters { loan: LoanParameters::new(450_000.0, 0.0625, 15, 52), ..good }),
        ];

        let outcomes = ScenarioRunner::run_batch(&scenarios, &ProjectionConfig::new(20));
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].label, "base");
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());

        let shorter = outcomes[2].result.as_ref().unwrap();
        assert_eq!(shorter.payoff_year(), Some(15));
    }

    #[test]
    fn test_run_uses_base_parameters() {
        let mut runner = ScenarioRunner::new();
        runner.parameters_mut().weekly_rental_income = 500.0;

        let result = runner.run(ProjectionConfig::new(1)).unwrap();
        assert_relative_eq!(result.records[0].rental_income, 500.0 * 52.0);
        assert_eq!(runner.parameters().weekly_rental_income, 500.0);
    }

    #[test]
    fn test_rate_steps() {
        let rates = rate_steps(0.04, 0.07, 0.01).unwrap();
        assert_eq!(rates.len(), 4);
        assert_relative_eq!(rates[3], 0.07, max_relative = 1e-12);
        assert_eq!(rate_steps(0.05, 0.05, 0.01).unwrap(), vec![0.05]);
    }

    #[test]
    fn test_rate_steps_rejects_empty_ranges() {
        let err = rate_steps(0.04, 0.07, 0.0).unwrap_err();
        assert!(matches!(err, OutlookError::InvalidInput { ref field, .. } if field == "step"));
        assert!(rate_steps(0.04, 0.07, -0.01).is_err());
        assert!(rate_steps(0.05, 0.04, 0.01).is_err());
    }
}
