//! Report renderers: terminal text and JSON.

pub mod format;
pub mod json;
pub mod text;

use clap::ValueEnum;
use serde::Deserialize;

pub use format::{format_percent, format_table_percent, Severity};
pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::ports::render::ReportRenderer;

/// Output format selectable from config or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

/// Build the renderer for `format`. `color` only affects text output.
pub fn renderer_for(format: OutputFormat, color: bool) -> Box<dyn ReportRenderer> {
  match format {
    OutputFormat::Text => Box::new(TextRenderer::new(color)),
    OutputFormat::Json => Box::new(JsonRenderer),
  }
}
