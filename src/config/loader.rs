//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating the table and solver
//! settings, and falling back to built-in defaults when no file exists.

use std::path::Path;

use anyhow::{Context, Result};

use super::{AppConfig, SolverMethod};
use crate::usecases::Axis;

/// Where the active configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
  File,
  Defaults,
}

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &Path) -> Result<AppConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  parse_config(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Load `path` if it exists, otherwise use the built-in defaults.
///
/// # Errors
/// Same as [`load_config`] when the file exists.
pub fn load_config_or_default(path: &Path) -> Result<(AppConfig, ConfigSource)> {
  if path.exists() {
    Ok((load_config(path)?, ConfigSource::File))
  } else {
    Ok((AppConfig::default(), ConfigSource::Defaults))
  }
}

/// Parse and validate configuration from TOML text.
///
/// # Errors
/// Fails on malformed TOML or when validation rules are violated.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse config TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate configuration parameters.
///
/// Checks for:
/// - Non-empty table axes (positive step, start <= end)
/// - At most `Axis::MAX_POINTS` points per axis
/// - Win-rate axis inside [0, 1]
/// - Positive bisection tolerance when bisection is selected
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.app.log_level.trim().is_empty(),
    "app.log_level must not be empty"
  );

  let win = &config.table.win_rates;
  anyhow::ensure!(
    !win.is_empty(),
    "table.win_rates axis is empty (start {}, end {}, step {})",
    win.start,
    win.end,
    win.step
  );
  anyhow::ensure!(
    !win.is_oversized(),
    "table.win_rates axis exceeds {} points (step {})",
    Axis::MAX_POINTS,
    win.step
  );
  anyhow::ensure!(
    win.start >= 0.0 && win.end <= 1.0,
    "table.win_rates must lie in [0, 1], got [{}, {}]",
    win.start,
    win.end
  );

  let rr = &config.table.risk_rewards;
  anyhow::ensure!(
    !rr.is_empty(),
    "table.risk_rewards axis is empty (start {}, end {}, step {})",
    rr.start,
    rr.end,
    rr.step
  );
  anyhow::ensure!(
    !rr.is_oversized(),
    "table.risk_rewards axis exceeds {} points (step {})",
    Axis::MAX_POINTS,
    rr.step
  );

  if config.solver.method == SolverMethod::Bisection {
    anyhow::ensure!(
      config.solver.tolerance.is_finite() && config.solver.tolerance > 0.0,
      "solver.tolerance must be positive, got {}",
      config.solver.tolerance
    );
  }

  Ok(())
}
