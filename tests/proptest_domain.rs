//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that the ruin estimator maintains its
//! mathematical invariants across random inputs.

use proptest::prelude::*;

use ruin_estimator::domain::{RuinError, RuinEstimator, StrategyParameters};

fn params(
    win_probability: f64,
    risk_reward: f64,
    risk_rate: f64,
    funds: f64,
    ruin_fraction: f64,
) -> StrategyParameters {
    StrategyParameters {
        win_probability,
        risk_reward,
        risk_rate,
        funds,
        ruin_line: funds * ruin_fraction,
    }
}

// ── Ruin Probability Properties ─────────────────────────────

proptest! {
    /// Ruin probability must always lie in [0, 1] for valid input.
    #[test]
    fn ruin_probability_in_unit_interval(
        p in 0.0f64..=1.0,
        rr in 0.05f64..5.0,
        rate in 0.001f64..0.5,
        funds in 1.0f64..1e7,
        ruin_fraction in 0.001f64..=1.0,
    ) {
        let prob = RuinEstimator::default()
            .probability(&params(p, rr, rate, funds, ruin_fraction))
            .unwrap();
        prop_assert!((0.0..=1.0).contains(&prob), "probability out of range: {prob}");
    }

    /// A better win rate never increases the ruin probability.
    #[test]
    fn ruin_probability_non_increasing_in_win_rate(
        p1 in 0.0f64..1.0,
        delta in 0.0f64..1.0,
        rr in 0.2f64..3.0,
        rate in 0.005f64..0.2,
        ruin_fraction in 0.1f64..0.9,
    ) {
        let p2 = (p1 + delta).min(1.0);
        let estimator = RuinEstimator::default();
        let low = estimator.probability(&params(p1, rr, rate, 1e6, ruin_fraction)).unwrap();
        let high = estimator.probability(&params(p2, rr, rate, 1e6, ruin_fraction)).unwrap();
        prop_assert!(
            high <= low,
            "not monotonic: P({p1})={low} < P({p2})={high}"
        );
    }

    /// Identical input yields a bit-identical result.
    #[test]
    fn ruin_probability_idempotent(
        p in 0.0f64..=1.0,
        rr in 0.05f64..5.0,
        rate in 0.001f64..0.5,
        ruin_fraction in 0.001f64..=1.0,
    ) {
        let estimator = RuinEstimator::default();
        let input = params(p, rr, rate, 1e6, ruin_fraction);
        let first = estimator.probability(&input).unwrap();
        let second = estimator.probability(&input).unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }
}

// ── Degenerate Inputs ───────────────────────────────────────

proptest! {
    /// A zero risk rate is always a division by zero.
    #[test]
    fn zero_risk_rate_always_division_by_zero(
        p in 0.0f64..=1.0,
        rr in 0.05f64..5.0,
        funds in 1.0f64..1e7,
        ruin_fraction in 0.0f64..=1.0,
    ) {
        let result = RuinEstimator::default().probability(&params(p, rr, 0.0, funds, ruin_fraction));
        prop_assert_eq!(result, Err(RuinError::DivisionByZero));
    }

    /// A zero ruin line is always a division by zero, whatever the risk rate.
    #[test]
    fn zero_ruin_line_always_division_by_zero(
        p in 0.0f64..=1.0,
        rr in 0.05f64..5.0,
        rate in 0.001f64..=1.0,
        funds in 1.0f64..1e7,
    ) {
        let result = RuinEstimator::default().probability(&params(p, rr, rate, funds, 0.0));
        prop_assert_eq!(result, Err(RuinError::DivisionByZero));
    }

    /// With the ruin line at the starting capital, ruin is certain.
    #[test]
    fn ruin_line_at_funds_is_certain(
        p in 0.0f64..=1.0,
        rr in 0.05f64..5.0,
        rate in 0.001f64..1.0,
        funds in 1.0f64..1e7,
    ) {
        let prob = RuinEstimator::default()
            .probability(&params(p, rr, rate, funds, 1.0))
            .unwrap();
        prop_assert!((prob - 1.0).abs() < f64::EPSILON, "got {prob}");
    }

    /// Out-of-range win probabilities are rejected before any arithmetic.
    #[test]
    fn out_of_range_win_probability_rejected(
        excess in 1e-6f64..10.0,
        below in proptest::bool::ANY,
    ) {
        let p = if below { -excess } else { 1.0 + excess };
        let result = RuinEstimator::default().probability(&params(p, 1.6, 0.02, 1e6, 0.5));
        prop_assert_eq!(result, Err(RuinError::InvalidParameter));
    }
}
