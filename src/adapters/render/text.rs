//! Plain-text renderer with optional ANSI severity colouring.

use std::fmt::Write as _;

use anyhow::Result;

use super::format::{format_percent, format_table_percent, Severity};
use crate::ports::render::ReportRenderer;
use crate::usecases::{ReportOutcome, RuinReport, RuinTable, TableCell};

const LABEL_WIDTH: usize = 8;
const CELL_WIDTH: usize = 8;
const CORNER_LABEL: &str = "RR\\Win";
const FAILED_CELL: &str = "err";

/// Terminal renderer.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
  color: bool,
}

impl TextRenderer {
  pub const fn new(color: bool) -> Self {
    Self { color }
  }

  fn paint(&self, severity: Severity, text: &str) -> String {
    if self.color {
      severity.paint(text)
    } else {
      text.to_string()
    }
  }
}

impl ReportRenderer for TextRenderer {
  fn render_single(&self, report: &RuinReport) -> Result<String> {
    let p = &report.parameters;
    let mut out = String::new();
    writeln!(out, "Win probability : {}", format_percent(p.win_probability))?;
    writeln!(out, "Risk/reward     : {}", p.risk_reward)?;
    writeln!(out, "Risk rate       : {}", format_percent(p.risk_rate))?;
    writeln!(out, "Funds           : {}", p.funds)?;
    writeln!(out, "Ruin line       : {}", p.ruin_line)?;

    match &report.outcome {
      ReportOutcome::Estimated(estimate) => {
        let text = format_percent(estimate.probability);
        let severity = Severity::from_probability(estimate.probability);
        writeln!(out, "Risk of ruin: {}", self.paint(severity, &text))?;
      }
      ReportOutcome::Failed { error } => {
        writeln!(out, "{error}")?;
      }
    }
    Ok(out)
  }

  fn render_table(&self, table: &RuinTable) -> Result<String> {
    let mut out = String::new();

    write!(out, "{CORNER_LABEL:<LABEL_WIDTH$}")?;
    for w in &table.win_rates {
      let header = format!("{:.0}%", w * 100.0);
      write!(out, "{header:>CELL_WIDTH$}")?;
    }
    writeln!(out)?;

    for (rr, row) in table.risk_rewards.iter().zip(&table.rows) {
      let label = format!("{rr:.1}");
      write!(out, "{label:<LABEL_WIDTH$}")?;
      for cell in row {
        // Pad before painting so escape codes do not skew alignment.
        let rendered = match cell {
          TableCell::Probability(p) => {
            let padded = format!("{:>CELL_WIDTH$}", format_table_percent(*p));
            self.paint(Severity::from_probability(*p), &padded)
          }
          TableCell::Failed { .. } => format!("{FAILED_CELL:>CELL_WIDTH$}"),
        };
        out.push_str(&rendered);
      }
      writeln!(out)?;
    }

    let failed: Vec<&str> = table
      .rows
      .iter()
      .flatten()
      .filter_map(|c| match c {
        TableCell::Failed { error } => Some(error.as_str()),
        TableCell::Probability(_) => None,
      })
      .collect();
    if let Some(first) = failed.first() {
      writeln!(out, "{} cell(s) failed: {first}", failed.len())?;
    }

    Ok(out)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{RuinEstimator, StrategyParameters};
  use crate::usecases::{build_table, SingleQuery, TableSpec};

  fn reference_report(win_probability: f64) -> RuinReport {
    SingleQuery::new(RuinEstimator::default()).run(StrategyParameters {
      win_probability,
      risk_reward: 1.6,
      risk_rate: 0.02,
      funds: 1_000_000.0,
      ruin_line: 500_000.0,
    })
  }

  #[test]
  fn test_single_report_plain() {
    let text = TextRenderer::new(false)
      .render_single(&reference_report(0.4))
      .unwrap();
    assert!(text.contains("Risk of ruin: 35.42%"), "{text}");
    assert!(text.contains("Funds           : 1000000"));
    assert!(!text.contains('\x1b'));
  }

  #[test]
  fn test_single_report_error_message() {
    let text = TextRenderer::new(true)
      .render_single(&reference_report(-0.01))
      .unwrap();
    assert!(text.ends_with("invalid strategy parameters\n"), "{text}");
    assert!(!text.contains("Risk of ruin"));
  }

  #[test]
  fn test_table_layout() {
    let table = build_table(&RuinEstimator::default(), &TableSpec::default()).unwrap();
    let text = TextRenderer::new(false).render_table(&table).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 16);
    assert!(lines[0].starts_with("RR\\Win"));
    assert!(lines[0].trim_end().ends_with("100%"));
    assert!(lines[1].starts_with("0.2"));
    assert!(lines[15].starts_with("3.0"));
    assert_eq!(lines[0].len(), LABEL_WIDTH + 10 * CELL_WIDTH);
  }

  #[test]
  fn test_table_colored() {
    let table = build_table(&RuinEstimator::default(), &TableSpec::default()).unwrap();
    let text = TextRenderer::new(true).render_table(&table).unwrap();
    // The 0.2 risk/reward row at 10% win rate is certain ruin.
    assert!(text.contains("\x1b[31m    100%\x1b[0m"));
  }
}
