//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports`.
//!
//! Adapter categories:
//! - `render`: Terminal text (ANSI severity colours) and JSON output

pub mod render;
