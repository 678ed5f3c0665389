//! Risk-of-ruin estimation for fixed-fraction repeated bets.
//!
//! A strategy that risks a fraction `r` of capital per trade, wins with
//! probability `P` and pays `RR` times the risk on a win, grows capital by
//! `ln(1 + RR·r)` on a win and shrinks it by `|ln(1 - r)|` on a loss. In
//! log-capital units the ruin problem becomes a random walk whose ruin
//! probability is `S^(n/b)`, where `S` is the sub-unit root of the
//! characteristic equation
//!
//!   f(x) = P·x^(R+1) + (1 - P) - x,   R = a / b
//!
//! and `n = ln(funds / ruin_line)` is the distance to the ruin line.
//!
//! The step-scan solver is authoritative: it walks upward from 0 in
//! increments of [`SCAN_STEP`] and returns the stepped value at the first
//! non-positive `f`. The bisection solver is an opt-in refinement.

use serde::Serialize;

use super::error::RuinError;
use super::parameters::StrategyParameters;

/// Resolution of the step-scan root search.
pub const SCAN_STEP: f64 = 1e-4;

/// Default convergence width for the bisection solver.
pub const DEFAULT_BISECTION_TOLERANCE: f64 = 1e-12;

const MAX_BISECTION_ITERATIONS: u32 = 200;

/// Evaluates the characteristic ruin equation `P·x^(R+1) + (1 - P) - x`.
#[inline]
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn ruin_equation(x: f64, p: f64, r: f64) -> f64 {
    p * x.powf(r + 1.0) + (1.0 - p) - x
}

/// Derived per-query quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuinCoefficients {
    /// Log-growth on a win: `ln(1 + risk_reward · risk_rate)`.
    pub a: f64,
    /// Log-shrink on a loss: `|ln(1 - risk_rate)|`.
    pub b: f64,
    /// Log-distance to the ruin line: `ln(funds / ruin_line)`.
    pub n: f64,
    /// Win/loss exponent ratio `a / b`.
    pub r: f64,
}

impl RuinCoefficients {
    /// Derives the coefficients from a parameter tuple.
    ///
    /// Does not re-validate ranges; callers validate first.
    ///
    /// # Errors
    /// [`RuinError::DivisionByZero`] when `b` is zero, or when `ruin_line`
    /// is zero or so small that `funds / ruin_line` overflows.
    #[allow(clippy::suboptimal_flops)] // rounding must match `1 + rr * r` exactly
    pub fn from_parameters(params: &StrategyParameters) -> Result<Self, RuinError> {
        let a = (1.0 + params.risk_reward * params.risk_rate).ln();
        let b = (1.0 - params.risk_rate).ln().abs();
        if b == 0.0 {
            return Err(RuinError::DivisionByZero);
        }
        let distance = params.funds / params.ruin_line;
        if params.ruin_line == 0.0 || distance.is_infinite() {
            return Err(RuinError::DivisionByZero);
        }
        let n = distance.ln();

        Ok(Self { a, b, n, r: a / b })
    }

    /// Exponent applied to the root: `n / b`.
    #[must_use]
    pub fn exponent(&self) -> f64 {
        self.n / self.b
    }
}

/// Root-finding strategy for the characteristic equation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum RootSolver {
    /// Fixed-step forward scan from 0 (step [`SCAN_STEP`]), clamped to 1.
    #[default]
    StepScan,
    /// Bisection on the bracket below the minimum of `f`.
    ///
    /// Opt-in refinement; does not reproduce step-scan outputs exactly.
    Bisection {
        /// Stop once the bracket is narrower than this.
        tolerance: f64,
    },
}

impl RootSolver {
    /// Returns the smallest `x` in [0, 1] at which `f(x; p, r)` is not positive.
    #[must_use]
    pub fn solve(&self, p: f64, r: f64) -> f64 {
        match *self {
            Self::StepScan => step_scan(p, r),
            Self::Bisection { tolerance } => bisect(p, r, tolerance),
        }
    }
}

/// Forward scan in increments of [`SCAN_STEP`].
///
/// The scan value is accumulated (`s += step`), not recomputed as
/// `i · step`, so outputs match the reference tables bit for bit.
fn step_scan(p: f64, r: f64) -> f64 {
    let mut s = 0.0_f64;
    while s < 1.0 && ruin_equation(s, p, r) > 0.0 {
        s += SCAN_STEP;
    }
    if s >= 1.0 { 1.0 } else { s }
}

/// Bisection using the convexity of `f` on [0, 1].
///
/// `f(0) = 1 - P` and `f(1) = 0`. A root below 1 exists only when the
/// minimum `x_m = (1 / (P·(R+1)))^(1/R)` lies inside the interval with
/// `f(x_m) < 0`; otherwise the answer is 1.
fn bisect(p: f64, r: f64, tolerance: f64) -> f64 {
    if ruin_equation(0.0, p, r) <= 0.0 {
        return 0.0;
    }
    if p <= 0.0 || r <= 0.0 {
        return 1.0;
    }

    let x_min = (1.0 / (p * (r + 1.0))).powf(1.0 / r);
    if x_min >= 1.0 || ruin_equation(x_min, p, r) >= 0.0 {
        return 1.0;
    }

    let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        DEFAULT_BISECTION_TOLERANCE
    };

    let (mut lo, mut hi) = (0.0_f64, x_min);
    let mut iterations = 0;
    while hi - lo > tolerance && iterations < MAX_BISECTION_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if ruin_equation(mid, p, r) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        iterations += 1;
    }
    hi
}

/// Full result of one estimation, including intermediate quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuinEstimate {
    pub coefficients: RuinCoefficients,
    /// Root `S` of the characteristic equation.
    pub root: f64,
    /// Ruin probability `S^(n/b)`, in [0, 1].
    pub probability: f64,
}

/// Stateless ruin-probability estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RuinEstimator {
    solver: RootSolver,
}

impl RuinEstimator {
    /// Creates an estimator using the given root solver.
    #[must_use]
    pub const fn new(solver: RootSolver) -> Self {
        Self { solver }
    }

    /// The configured root solver.
    #[must_use]
    pub const fn solver(&self) -> RootSolver {
        self.solver
    }

    /// Validates, derives coefficients, solves for the root and returns
    /// every intermediate value.
    ///
    /// # Errors
    /// Fails with [`RuinError`] before any arithmetic on invalid input, or
    /// when a coefficient would divide by zero.
    pub fn estimate(&self, params: &StrategyParameters) -> Result<RuinEstimate, RuinError> {
        params.validate()?;
        let coefficients = RuinCoefficients::from_parameters(params)?;
        let root = self.solver.solve(params.win_probability, coefficients.r);
        Ok(RuinEstimate {
            coefficients,
            root,
            probability: root.powf(coefficients.exponent()),
        })
    }

    /// Ruin probability for one parameter tuple.
    ///
    /// # Errors
    /// See [`Self::estimate`].
    pub fn probability(&self, params: &StrategyParameters) -> Result<f64, RuinError> {
        self.estimate(params).map(|e| e.probability)
    }
}

/// Ruin probability using the authoritative step-scan solver.
///
/// # Errors
/// - [`RuinError::InvalidParameter`] for out-of-range input.
/// - [`RuinError::DivisionByZero`] when `risk_rate` or `ruin_line` is 0.
pub fn compute_ruin_probability(
    win_probability: f64,
    risk_reward: f64,
    risk_rate: f64,
    funds: f64,
    ruin_line: f64,
) -> Result<f64, RuinError> {
    let params = StrategyParameters {
        win_probability,
        risk_reward,
        risk_rate,
        funds,
        ruin_line,
    };
    RuinEstimator::default().probability(&params)
}
