//! Domain layer - Risk-of-ruin core.
//!
//! Pure, synchronous and stateless. No I/O and no logging here; every call
//! is a function of its input, so callers may fan queries out across
//! threads without coordination.

pub mod error;
pub mod parameters;
pub mod ruin;

// Re-export core types for convenience
pub use error::RuinError;
pub use parameters::StrategyParameters;
pub use ruin::{
    compute_ruin_probability, ruin_equation, RootSolver, RuinCoefficients, RuinEstimate,
    RuinEstimator, SCAN_STEP,
};
