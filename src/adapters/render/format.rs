//! Percentage formatting and severity banding for ruin probabilities.

use serde::Serialize;

/// Below this, a table cell shows `0%`.
const DISPLAY_ZERO_BELOW: f64 = 0.005;
/// At or above this, a table cell shows `100%`.
const DISPLAY_FULL_FROM: f64 = 0.995;

const ANSI_RESET: &str = "\x1b[0m";

/// Two-decimal percentage, e.g. `0.3541` -> `35.41%`.
pub fn format_percent(probability: f64) -> String {
  format!("{:.2}%", probability * 100.0)
}

/// Table-cell percentage.
///
/// `<0.5%` is `0%`, `>=99.5%` is `100%`; otherwise two decimals with
/// trailing zeros and a dangling decimal point removed (`12.50%` -> `12.5%`).
pub fn format_table_percent(probability: f64) -> String {
  if probability < DISPLAY_ZERO_BELOW {
    return "0%".to_string();
  }
  if probability >= DISPLAY_FULL_FROM {
    return "100%".to_string();
  }
  let fixed = format!("{:.2}", probability * 100.0);
  let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
  format!("{trimmed}%")
}

/// Colour band of a ruin probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
  /// < 0.5%
  Lime,
  /// < 1%
  Green,
  /// < 10%
  Gold,
  /// < 100%
  Orange,
  /// certain ruin
  Red,
}

impl Severity {
  pub fn from_probability(probability: f64) -> Self {
    if probability < 0.005 {
      Self::Lime
    } else if probability < 0.01 {
      Self::Green
    } else if probability < 0.1 {
      Self::Gold
    } else if probability < 1.0 {
      Self::Orange
    } else {
      Self::Red
    }
  }

  const fn ansi_code(self) -> &'static str {
    match self {
      Self::Lime => "\x1b[92m",
      Self::Green => "\x1b[32m",
      Self::Gold => "\x1b[33m",
      Self::Orange => "\x1b[38;5;208m",
      Self::Red => "\x1b[31m",
    }
  }

  /// Wrap `text` in this band's ANSI colour.
  pub fn paint(self, text: &str) -> String {
    format!("{}{text}{ANSI_RESET}", self.ansi_code())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_percent() {
    assert_eq!(format_percent(0.354_172_792_897_465_67), "35.42%");
    assert_eq!(format_percent(1.0), "100.00%");
    assert_eq!(format_percent(0.0), "0.00%");
  }

  #[test]
  fn test_table_percent_thresholds() {
    assert_eq!(format_table_percent(0.004_9), "0%");
    assert_eq!(format_table_percent(0.995), "100%");
    assert_eq!(format_table_percent(1.0), "100%");
    assert_eq!(format_table_percent(0.005), "0.5%");
  }

  #[test]
  fn test_table_percent_trims() {
    assert_eq!(format_table_percent(0.125), "12.5%");
    assert_eq!(format_table_percent(0.5), "50%");
    assert_eq!(format_table_percent(0.022_151_430_157_572_48), "2.22%");
  }

  #[test]
  fn test_severity_bands() {
    assert_eq!(Severity::from_probability(0.0), Severity::Lime);
    assert_eq!(Severity::from_probability(0.004_9), Severity::Lime);
    assert_eq!(Severity::from_probability(0.005), Severity::Green);
    assert_eq!(Severity::from_probability(0.05), Severity::Gold);
    assert_eq!(Severity::from_probability(0.5), Severity::Orange);
    assert_eq!(Severity::from_probability(0.999_9), Severity::Orange);
    assert_eq!(Severity::from_probability(1.0), Severity::Red);
  }

  #[test]
  fn test_paint_wraps_and_resets() {
    let painted = Severity::Red.paint("100%");
    assert!(painted.starts_with("\x1b[31m"));
    assert!(painted.ends_with("\x1b[0m"));
    assert!(painted.contains("100%"));
  }
}
