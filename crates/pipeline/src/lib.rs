//! Era range resolution and the per era aggregation jobs.

/// Generic per era aggregation harness
pub mod job;
/// The six era reports
pub mod reports;
/// Era change events to block ranges
pub mod resolver;
/// Load, run and persist
pub mod runner;

pub use job::{AggregationJob, EraReport};
pub use resolver::EraIndexResolver;
pub use runner::{aggregate, resolve_era_ranges};
