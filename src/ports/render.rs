//! Report Rendering Port - Presentation Boundary
//!
//! The ruin core returns raw probabilities; everything about how they are
//! shown (rounding, colour bands, layout) lives behind this trait.

use anyhow::Result;

use crate::usecases::{RuinReport, RuinTable};

/// Turns use-case results into text for the terminal or another consumer.
pub trait ReportRenderer {
  /// Render a single-query report.
  fn render_single(&self, report: &RuinReport) -> Result<String>;

  /// Render a win-rate x risk/reward table.
  fn render_table(&self, table: &RuinTable) -> Result<String>;
}
