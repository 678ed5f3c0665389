//! Ruin Table - Win Rate x Risk/Reward Grid
//!
//! Evaluates the estimator once per (risk/reward row, win-rate column)
//! cell with risk rate, funds and ruin line held fixed. Rows are computed
//! in parallel with rayon; each cell is an independent pure call.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{RuinError, RuinEstimator, StrategyParameters};

/// Inclusive numeric range `start, start + step, ..., <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
  pub start: f64,
  pub end: f64,
  pub step: f64,
}

impl Axis {
  /// Slack absorbing float error when `end` sits exactly on a step.
  const END_SLACK: f64 = 1e-9;

  /// Largest number of points a table axis may hold.
  pub const MAX_POINTS: usize = 10_000;

  pub const fn new(start: f64, end: f64, step: f64) -> Self {
    Self { start, end, step }
  }

  /// Number of points on the axis (0 for a malformed axis).
  ///
  /// Saturates at `usize::MAX` when the step is tiny relative to the span.
  #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
  pub fn len(&self) -> usize {
    let well_formed = self.start.is_finite()
      && self.end.is_finite()
      && self.step.is_finite()
      && self.step > 0.0
      && self.end >= self.start;
    if !well_formed {
      return 0;
    }
    let steps = ((self.end - self.start) / self.step + Self::END_SLACK).floor();
    (steps as usize).saturating_add(1)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// More points than [`Self::MAX_POINTS`].
  pub fn is_oversized(&self) -> bool {
    self.len() > Self::MAX_POINTS
  }

  /// Axis points, computed as `start + i * step`.
  #[allow(clippy::cast_precision_loss)]
  pub fn values(&self) -> Vec<f64> {
    (0..self.len())
      .map(|i| self.start + i as f64 * self.step)
      .collect()
  }
}

/// What to do when a single cell fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellErrorPolicy {
  /// Fail the whole table on the first failing cell.
  #[default]
  Abort,
  /// Keep going and store the error in the cell.
  Sentinel,
}

/// Table layout and the parameters held fixed across cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
  /// Column axis (win probability).
  pub win_rates: Axis,
  /// Row axis (risk/reward ratio).
  pub risk_rewards: Axis,
  pub risk_rate: f64,
  pub funds: f64,
  pub ruin_line: f64,
  pub on_error: CellErrorPolicy,
}

impl Default for TableSpec {
  fn default() -> Self {
    Self {
      win_rates: Axis::new(0.1, 1.0, 0.1),
      risk_rewards: Axis::new(0.2, 3.0, 0.2),
      risk_rate: 0.02,
      funds: 1_000_000.0,
      ruin_line: 500_000.0,
      on_error: CellErrorPolicy::Abort,
    }
  }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableCell {
  Probability(f64),
  Failed { error: String },
}

impl TableCell {
  pub fn probability(&self) -> Option<f64> {
    match self {
      Self::Probability(p) => Some(*p),
      Self::Failed { .. } => None,
    }
  }
}

/// Computed ruin table. `rows[i][j]` is risk/reward `i`, win rate `j`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuinTable {
  pub win_rates: Vec<f64>,
  pub risk_rewards: Vec<f64>,
  pub risk_rate: f64,
  pub funds: f64,
  pub ruin_line: f64,
  pub rows: Vec<Vec<TableCell>>,
}

impl RuinTable {
  pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
    self.rows.get(row).and_then(|r| r.get(col))
  }

  /// Number of failed cells (always 0 under [`CellErrorPolicy::Abort`]).
  pub fn failed_cells(&self) -> usize {
    self
      .rows
      .iter()
      .flatten()
      .filter(|c| matches!(c, TableCell::Failed { .. }))
      .count()
  }
}

/// Errors from table generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
  #[error("{0} axis is empty")]
  EmptyAxis(&'static str),

  #[error("{0} axis has more than {max} points", max = Axis::MAX_POINTS)]
  OversizedAxis(&'static str),

  #[error("cell (risk/reward {risk_reward}, win rate {win_rate}) failed: {source}")]
  Cell {
    risk_reward: f64,
    win_rate: f64,
    #[source]
    source: RuinError,
  },
}

/// Build the ruin table described by `spec`.
///
/// # Errors
/// Returns [`TableError::EmptyAxis`] for a malformed axis,
/// [`TableError::OversizedAxis`] for an axis above [`Axis::MAX_POINTS`], or
/// [`TableError::Cell`] under [`CellErrorPolicy::Abort`] when a cell fails.
pub fn build_table(estimator: &RuinEstimator, spec: &TableSpec) -> Result<RuinTable, TableError> {
  if spec.win_rates.is_oversized() {
    return Err(TableError::OversizedAxis("win rate"));
  }
  if spec.risk_rewards.is_oversized() {
    return Err(TableError::OversizedAxis("risk/reward"));
  }
  let win_rates = spec.win_rates.values();
  let risk_rewards = spec.risk_rewards.values();
  if win_rates.is_empty() {
    return Err(TableError::EmptyAxis("win rate"));
  }
  if risk_rewards.is_empty() {
    return Err(TableError::EmptyAxis("risk/reward"));
  }

  info!(
    rows = risk_rewards.len(),
    cols = win_rates.len(),
    risk_rate = spec.risk_rate,
    funds = spec.funds,
    ruin_line = spec.ruin_line,
    policy = ?spec.on_error,
    "Building ruin table"
  );

  let rows = risk_rewards
    .par_iter()
    .map(|&risk_reward| build_row(estimator, spec, &win_rates, risk_reward))
    .collect::<Result<Vec<_>, _>>()?;

  let table = RuinTable {
    win_rates,
    risk_rewards,
    risk_rate: spec.risk_rate,
    funds: spec.funds,
    ruin_line: spec.ruin_line,
    rows,
  };

  info!(failed = table.failed_cells(), "Ruin table complete");
  Ok(table)
}

fn build_row(
  estimator: &RuinEstimator,
  spec: &TableSpec,
  win_rates: &[f64],
  risk_reward: f64,
) -> Result<Vec<TableCell>, TableError> {
  let row = win_rates
    .iter()
    .map(|&win_rate| {
      let params = StrategyParameters {
        win_probability: win_rate,
        risk_reward,
        risk_rate: spec.risk_rate,
        funds: spec.funds,
        ruin_line: spec.ruin_line,
      };
      match (estimator.probability(&params), spec.on_error) {
        (Ok(p), _) => Ok(TableCell::Probability(p)),
        (Err(e), CellErrorPolicy::Sentinel) => Ok(TableCell::Failed {
          error: e.to_string(),
        }),
        (Err(source), CellErrorPolicy::Abort) => Err(TableError::Cell {
          risk_reward,
          win_rate,
          source,
        }),
      }
    })
    .collect::<Result<Vec<_>, _>>()?;

  debug!(risk_reward, cells = row.len(), "Row computed");
  Ok(row)
}
