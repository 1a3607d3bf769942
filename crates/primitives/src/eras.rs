//! Era data model.
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Signal that a new era began at a given block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraChangeEvent {
    /// Era index as declared by the event
    pub era_index: u32,
    /// Archive block identifier, `<zero padded height>-<suffix>`
    pub block_id: String,
}

impl EraChangeEvent {
    /// Create a new event.
    pub fn new(era_index: u32, block_id: impl Into<String>) -> Self {
        Self { era_index, block_id: block_id.into() }
    }

    /// Block height encoded in the leading digits of the block identifier.
    pub fn height(&self) -> Result<u64> {
        let head = self.block_id.split(['_', '-']).next().unwrap_or_default();
        let digits: &str = &head[..head.bytes().take_while(u8::is_ascii_digit).count()];
        if digits.is_empty() {
            return Err(ReportError::MalformedEventData(format!(
                "block id {:?} does not start with a height",
                self.block_id
            )));
        }
        digits.parse::<u64>().map_err(|e| {
            ReportError::MalformedEventData(format!("block id {:?}: {e}", self.block_id))
        })
    }
}

/// Inclusive block interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSpan {
    /// First block
    pub start: u64,
    /// Last block, inclusive
    pub end: u64,
}

/// Contiguous block range covered by one era, with verified boundary hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraBlockRange {
    /// Era index
    pub era_index: u32,
    /// First block of the era
    pub block_start: u64,
    /// Hash of `block_start`
    pub block_start_hash: String,
    /// Last block of the era, inclusive
    pub block_end: u64,
    /// Hash of `block_end`
    pub block_end_hash: String,
}

impl EraBlockRange {
    /// Column names of the persisted range table.
    pub const HEADER: [&'static str; 5] =
        ["Era Index", "Block Start", "Block Start Hash", "Block End", "Block End Hash"];

    /// The inclusive block span of this era.
    pub const fn span(&self) -> BlockSpan {
        BlockSpan { start: self.block_start, end: self.block_end }
    }

    /// Table record in [`Self::HEADER`] order.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.era_index.to_string(),
            self.block_start.to_string(),
            self.block_start_hash.clone(),
            self.block_end.to_string(),
            self.block_end_hash.clone(),
        ]
    }
}

/// One output row of an aggregation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    /// Era index
    pub era_index: u32,
    /// First block of the era
    pub block_start: u64,
    /// Last block of the era
    pub block_end: u64,
    /// Report specific metric cells, in header order
    pub metrics: Vec<String>,
}

impl MetricRow {
    /// Leading columns shared by every report.
    pub const LEADING_HEADER: [&'static str; 3] = ["Era Index", "From Block", "To Block"];

    /// Create a row for `range` holding `metrics`.
    pub fn new(range: &EraBlockRange, metrics: Vec<String>) -> Self {
        Self {
            era_index: range.era_index,
            block_start: range.block_start,
            block_end: range.block_end,
            metrics,
        }
    }

    /// Flatten into table cells.
    pub fn into_record(self) -> Vec<String> {
        let mut record = Vec::with_capacity(3 + self.metrics.len());
        record.push(self.era_index.to_string());
        record.push(self.block_start.to_string());
        record.push(self.block_end.to_string());
        record.extend(self.metrics);
        record
    }
}
