//! Use Cases Layer - Application Workflows
//!
//! Drives the pure ruin core for its two callers.
//!
//! Use cases:
//! - `SingleQuery`: one tuple, one report (errors become report messages)
//! - `build_table`: win-rate x risk/reward grid evaluated in parallel

pub mod ruin_table;
pub mod single_query;

pub use ruin_table::{
  build_table, Axis, CellErrorPolicy, RuinTable, TableCell, TableError, TableSpec,
};
pub use single_query::{ReportOutcome, RuinReport, SingleQuery};
