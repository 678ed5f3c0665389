//! Domain error taxonomy for ruin estimation.

use thiserror::Error;

/// Errors raised by the ruin-probability core.
///
/// Every variant is raised before any partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuinError {
    /// One or more strategy parameters are outside their documented range.
    #[error("invalid strategy parameters")]
    InvalidParameter,

    /// A derived quantity divides by zero: the loss exponent
    /// `|ln(1 - risk_rate)|` when risk_rate = 0, or `funds / ruin_line`
    /// when ruin_line = 0.
    #[error("division by zero: risk rate and ruin line must both be non-zero")]
    DivisionByZero,
}
