//! JSON renderer.
//!
//! Emits the raw probabilities alongside the display string and severity
//! band, so downstream tools can either re-format or show as-is.

use anyhow::{Context, Result};
use serde::Serialize;

use super::format::{format_table_percent, Severity};
use crate::ports::render::ReportRenderer;
use crate::usecases::{RuinReport, RuinTable, TableCell};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonCell<'a> {
  probability: Option<f64>,
  display: String,
  severity: Option<Severity>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonTable<'a> {
  win_rates: &'a [f64],
  risk_rewards: &'a [f64],
  risk_rate: f64,
  funds: f64,
  ruin_line: f64,
  rows: Vec<Vec<JsonCell<'a>>>,
}

impl<'a> From<&'a TableCell> for JsonCell<'a> {
  fn from(cell: &'a TableCell) -> Self {
    match cell {
      TableCell::Probability(p) => Self {
        probability: Some(*p),
        display: format_table_percent(*p),
        severity: Some(Severity::from_probability(*p)),
        error: None,
      },
      TableCell::Failed { error } => Self {
        probability: None,
        display: String::new(),
        severity: None,
        error: Some(error.as_str()),
      },
    }
  }
}

impl ReportRenderer for JsonRenderer {
  fn render_single(&self, report: &RuinReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize ruin report")
  }

  fn render_table(&self, table: &RuinTable) -> Result<String> {
    let view = JsonTable {
      win_rates: &table.win_rates,
      risk_rewards: &table.risk_rewards,
      risk_rate: table.risk_rate,
      funds: table.funds,
      ruin_line: table.ruin_line,
      rows: table
        .rows
        .iter()
        .map(|row| row.iter().map(JsonCell::from).collect())
        .collect(),
    };
    serde_json::to_string_pretty(&view).context("Failed to serialize ruin table")
  }
}
