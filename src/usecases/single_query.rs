//! Single Query - One Parameter Tuple, One Report
//!
//! Runs the estimator once and packages the outcome together with the
//! echoed parameters. Invalid input does not abort the caller: the report
//! carries the error message in place of a result.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{RootSolver, RuinEstimate, RuinEstimator, StrategyParameters};

/// Outcome of a single estimation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
  /// Estimation succeeded.
  Estimated(RuinEstimate),
  /// Estimation was rejected; holds the error message.
  Failed { error: String },
}

/// Report for one strategy tuple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuinReport {
  /// Parameters as supplied by the caller.
  pub parameters: StrategyParameters,
  /// Root solver used.
  pub solver: RootSolver,
  /// Result or error.
  pub outcome: ReportOutcome,
}

impl RuinReport {
  /// Ruin probability, if the estimation succeeded.
  pub fn probability(&self) -> Option<f64> {
    match &self.outcome {
      ReportOutcome::Estimated(estimate) => Some(estimate.probability),
      ReportOutcome::Failed { .. } => None,
    }
  }
}

/// Single-query use case.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleQuery {
  estimator: RuinEstimator,
}

impl SingleQuery {
  /// Create a single-query runner around an estimator.
  pub fn new(estimator: RuinEstimator) -> Self {
    Self { estimator }
  }

  /// Estimate the ruin probability for `parameters`.
  pub fn run(&self, parameters: StrategyParameters) -> RuinReport {
    let outcome = match self.estimator.estimate(&parameters) {
      Ok(estimate) => {
        info!(
          win_probability = parameters.win_probability,
          risk_reward = parameters.risk_reward,
          risk_rate = parameters.risk_rate,
          root = estimate.root,
          probability = estimate.probability,
          "Ruin probability estimated"
        );
        ReportOutcome::Estimated(estimate)
      }
      Err(e) => {
        warn!(error = %e, ?parameters, "Ruin estimation rejected");
        ReportOutcome::Failed {
          error: e.to_string(),
        }
      }
    };

    RuinReport {
      parameters,
      solver: self.estimator.solver(),
      outcome,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params(win_probability: f64, risk_rate: f64) -> StrategyParameters {
    StrategyParameters {
      win_probability,
      risk_reward: 1.6,
      risk_rate,
      funds: 1_000_000.0,
      ruin_line: 500_000.0,
    }
  }

  #[test]
  fn test_report_carries_probability() {
    let report = SingleQuery::default().run(params(0.4, 0.02));
    let p = report.probability().unwrap();
    assert!((p - 0.354_172_792_897_465_67).abs() < 1e-9);
    assert_eq!(report.solver, RootSolver::StepScan);
  }

  #[test]
  fn test_invalid_input_becomes_message() {
    let report = SingleQuery::default().run(params(-0.01, 0.02));
    assert_eq!(report.probability(), None);
    assert_eq!(
      report.outcome,
      ReportOutcome::Failed {
        error: "invalid strategy parameters".to_string()
      }
    );
  }

  #[test]
  fn test_zero_risk_rate_becomes_message() {
    let report = SingleQuery::default().run(params(0.4, 0.0));
    match report.outcome {
      ReportOutcome::Failed { error } => assert!(error.starts_with("division by zero")),
      ReportOutcome::Estimated(_) => panic!("expected failure"),
    }
  }
}
