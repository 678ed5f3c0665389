//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use cases hand their results
//! to. Adapters implement these traits.
//!
//! Port categories:
//! - `ReportRenderer`: Presentation of single reports and ruin tables

pub mod render;
