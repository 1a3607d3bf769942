//! Core primitives for the era metrics pipeline.
/// Native and bridged assets with their decimal scales
pub mod assets;
/// Capabilities consumed from external data sources
pub mod sources;
/// Era change events and resolved era block ranges
pub mod eras;
/// Error taxonomy shared by every crate
pub mod error;
/// Raw records returned by range scoped queries
pub mod records;
/// Reduction shapes used by the aggregation jobs
pub mod reduce;
/// Fixed point rendering of integer token amounts
pub mod units;

pub use eras::{BlockSpan, EraBlockRange, EraChangeEvent, MetricRow};
pub use error::{ReportError, Result};
