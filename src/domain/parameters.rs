//! Strategy parameters value object.
//!
//! Immutable and constructed fresh per query. Validation is a single
//! undifferentiated pass: any field out of range makes the whole tuple
//! invalid.

use serde::Serialize;

use super::error::RuinError;

/// Parameters of a fixed-fraction repeated-bet strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrategyParameters {
    /// Probability that a single trade wins, in [0, 1].
    pub win_probability: f64,
    /// Payoff of a win relative to a loss, > 0.
    pub risk_reward: f64,
    /// Fraction of current capital risked per trade, in [0, 1].
    pub risk_rate: f64,
    /// Starting capital, > 0.
    pub funds: f64,
    /// Capital threshold that defines ruin, in [0, funds].
    pub ruin_line: f64,
}

impl StrategyParameters {
    /// Builds a validated parameter tuple.
    ///
    /// # Errors
    /// Returns [`RuinError::InvalidParameter`] if any field is out of range.
    pub fn new(
        win_probability: f64,
        risk_reward: f64,
        risk_rate: f64,
        funds: f64,
        ruin_line: f64,
    ) -> Result<Self, RuinError> {
        let params = Self {
            win_probability,
            risk_reward,
            risk_rate,
            funds,
            ruin_line,
        };
        params.validate()?;
        Ok(params)
    }

    /// Returns `true` when the tuple violates any field constraint.
    ///
    /// Non-finite values are invalid.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        let all_finite = [
            self.win_probability,
            self.risk_reward,
            self.risk_rate,
            self.funds,
            self.ruin_line,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return true;
        }

        if !(0.0..=1.0).contains(&self.win_probability) {
            return true;
        }
        if self.risk_reward <= 0.0 {
            return true;
        }
        if !(0.0..=1.0).contains(&self.risk_rate) {
            return true;
        }
        if self.funds <= 0.0 {
            return true;
        }
        if self.ruin_line < 0.0 || self.ruin_line > self.funds {
            return true;
        }

        false
    }

    /// Validates the tuple.
    ///
    /// # Errors
    /// Returns [`RuinError::InvalidParameter`] if [`Self::is_invalid`] holds.
    pub fn validate(&self) -> Result<(), RuinError> {
        if self.is_invalid() {
            return Err(RuinError::InvalidParameter);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> StrategyParameters {
        StrategyParameters {
            win_probability: 0.4,
            risk_reward: 1.6,
            risk_rate: 0.02,
            funds: 1_000_000.0,
            ruin_line: 500_000.0,
        }
    }

    #[test]
    fn test_reference_tuple_is_valid() {
        assert!(!base().is_invalid());
    }

    #[test]
    fn test_win_probability_bounds() {
        let below = StrategyParameters { win_probability: -0.01, ..base() };
        let above = StrategyParameters { win_probability: 1.01, ..base() };
        let edge = StrategyParameters { win_probability: 1.0, ..base() };
        assert!(below.is_invalid());
        assert!(above.is_invalid());
        assert!(!edge.is_invalid());
    }

    #[test]
    fn test_risk_reward_must_be_positive() {
        assert!(StrategyParameters { risk_reward: 0.0, ..base() }.is_invalid());
        assert!(StrategyParameters { risk_reward: -1.0, ..base() }.is_invalid());
    }

    #[test]
    fn test_risk_rate_bounds() {
        assert!(StrategyParameters { risk_rate: 1.5, ..base() }.is_invalid());
        assert!(StrategyParameters { risk_rate: -0.1, ..base() }.is_invalid());
        // Zero passes validation; it fails later as a division by zero.
        assert!(!StrategyParameters { risk_rate: 0.0, ..base() }.is_invalid());
    }

    #[test]
    fn test_funds_and_ruin_line() {
        assert!(StrategyParameters { funds: 0.0, ..base() }.is_invalid());
        assert!(StrategyParameters { ruin_line: -1.0, ..base() }.is_invalid());
        assert!(StrategyParameters { ruin_line: 1_000_001.0, ..base() }.is_invalid());
        assert!(!StrategyParameters { ruin_line: 1_000_000.0, ..base() }.is_invalid());
        assert!(!StrategyParameters { ruin_line: 0.0, ..base() }.is_invalid());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(StrategyParameters { win_probability: f64::NAN, ..base() }.is_invalid());
        assert!(StrategyParameters { risk_reward: f64::NAN, ..base() }.is_invalid());
        assert!(StrategyParameters { funds: f64::INFINITY, ..base() }.is_invalid());
    }

    #[test]
    fn test_new_returns_invalid_parameter() {
        let err = StrategyParameters::new(-0.01, 1.6, 0.02, 1e6, 5e5).unwrap_err();
        assert_eq!(err, RuinError::InvalidParameter);
    }
}
