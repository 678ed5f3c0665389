//! Configuration Module - TOML-based Estimator Configuration
//!
//! Loads the default single-query tuple, the table layout, the root
//! solver choice and output/logging preferences from `config.toml`.
//! Every section is optional; missing values fall back to the reference
//! tool's parameters. Strategy values are not range-checked here: the
//! domain validates them on every call.

pub mod loader;

use clap::ValueEnum;
use serde::Deserialize;

use crate::adapters::render::OutputFormat;
use crate::domain::ruin::DEFAULT_BISECTION_TOLERANCE;
use crate::domain::{RootSolver, StrategyParameters};
use crate::usecases::{Axis, CellErrorPolicy, TableSpec};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Identity and logging.
  #[serde(default)]
  pub app: AppSection,
  /// Single-query parameter tuple.
  #[serde(default)]
  pub strategy: StrategyConfig,
  /// Ruin table layout.
  #[serde(default)]
  pub table: TableConfig,
  /// Root solver selection.
  #[serde(default)]
  pub solver: SolverConfig,
  /// Report output.
  #[serde(default)]
  pub output: OutputConfig,
}

/// Identity and logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable name, echoed in logs.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Log line format.
  #[serde(default)]
  pub log_format: LogFormat,
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

/// Single-query strategy tuple.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StrategyConfig {
  #[serde(default = "default_win_probability")]
  pub win_probability: f64,
  #[serde(default = "default_risk_reward")]
  pub risk_reward: f64,
  #[serde(default = "default_risk_rate")]
  pub risk_rate: f64,
  #[serde(default = "default_funds")]
  pub funds: f64,
  #[serde(default = "default_ruin_line")]
  pub ruin_line: f64,
}

/// Ruin table layout. Risk rate, funds and ruin line are fixed per table.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TableConfig {
  /// Column axis.
  #[serde(default = "default_win_rates")]
  pub win_rates: Axis,
  /// Row axis.
  #[serde(default = "default_risk_rewards")]
  pub risk_rewards: Axis,
  #[serde(default = "default_risk_rate")]
  pub risk_rate: f64,
  #[serde(default = "default_funds")]
  pub funds: f64,
  #[serde(default = "default_ruin_line")]
  pub ruin_line: f64,
  /// Per-cell failure handling.
  #[serde(default)]
  pub on_error: CellErrorPolicy,
}

/// Root solver selection.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SolverConfig {
  #[serde(default)]
  pub method: SolverMethod,
  /// Bracket width for bisection; ignored by the step scan.
  #[serde(default = "default_tolerance")]
  pub tolerance: f64,
}

/// Root solver name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SolverMethod {
  /// Fixed 1e-4 forward scan (reference outputs).
  #[default]
  StepScan,
  /// Bisection refinement.
  Bisection,
}

/// Report output configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OutputConfig {
  #[serde(default)]
  pub format: OutputFormat,
  /// Colour text output by severity (only when stdout is a terminal).
  #[serde(default = "default_true")]
  pub color: bool,
}

impl StrategyConfig {
  /// The configured tuple, unvalidated.
  pub const fn to_parameters(&self) -> StrategyParameters {
    StrategyParameters {
      win_probability: self.win_probability,
      risk_reward: self.risk_reward,
      risk_rate: self.risk_rate,
      funds: self.funds,
      ruin_line: self.ruin_line,
    }
  }
}

impl TableConfig {
  pub const fn to_spec(&self) -> TableSpec {
    TableSpec {
      win_rates: self.win_rates,
      risk_rewards: self.risk_rewards,
      risk_rate: self.risk_rate,
      funds: self.funds,
      ruin_line: self.ruin_line,
      on_error: self.on_error,
    }
  }
}

impl SolverConfig {
  pub const fn to_solver(&self) -> RootSolver {
    match self.method {
      SolverMethod::StepScan => RootSolver::StepScan,
      SolverMethod::Bisection => RootSolver::Bisection {
        tolerance: self.tolerance,
      },
    }
  }
}

impl Default for AppSection {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
      log_format: LogFormat::default(),
    }
  }
}

impl Default for StrategyConfig {
  fn default() -> Self {
    Self {
      win_probability: default_win_probability(),
      risk_reward: default_risk_reward(),
      risk_rate: default_risk_rate(),
      funds: default_funds(),
      ruin_line: default_ruin_line(),
    }
  }
}

impl Default for TableConfig {
  fn default() -> Self {
    let spec = TableSpec::default();
    Self {
      win_rates: spec.win_rates,
      risk_rewards: spec.risk_rewards,
      risk_rate: spec.risk_rate,
      funds: spec.funds,
      ruin_line: spec.ruin_line,
      on_error: spec.on_error,
    }
  }
}

impl Default for SolverConfig {
  fn default() -> Self {
    Self {
      method: SolverMethod::default(),
      tolerance: default_tolerance(),
    }
  }
}

impl Default for OutputConfig {
  fn default() -> Self {
    Self {
      format: OutputFormat::default(),
      color: true,
    }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "ruin-estimator".to_string()
}

fn default_log_level() -> String {
  "warn".to_string()
}

fn default_true() -> bool {
  true
}

fn default_win_probability() -> f64 {
  0.4
}

fn default_risk_reward() -> f64 {
  1.6
}

fn default_risk_rate() -> f64 {
  0.02
}

fn default_funds() -> f64 {
  1_000_000.0
}

fn default_ruin_line() -> f64 {
  500_000.0
}

fn default_win_rates() -> Axis {
  TableSpec::default().win_rates
}

fn default_risk_rewards() -> Axis {
  TableSpec::default().risk_rewards
}

fn default_tolerance() -> f64 {
  DEFAULT_BISECTION_TOLERANCE
}
