use futures::{StreamExt, TryStreamExt, future, stream};
use primitives::{
    BlockSpan, EraBlockRange, EraChangeEvent, ReportError, Result,
    sources::{BlockHashLookup, EraEventLog},
};
use tracing::{debug, info};

/// Boundary hash lookups kept in flight at once.
pub const DEFAULT_LOOKUP_CONCURRENCY: usize = 8;

/// An era and its block span, before boundary hashes are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraSpan {
    /// Era index
    pub era_index: u32,
    /// Inclusive block span
    pub span: BlockSpan,
}

/// Turn era change events, ascending by height, into contiguous era spans.
///
/// Era 0 covers everything before the first event. Every other event opens
/// era `event.era_index + 1`, which runs until the block before the next
/// event. The last event has no successor so the era it opens is still in
/// progress and is not returned. No events means no spans.
pub fn plan_era_spans(events: &[EraChangeEvent]) -> Result<Vec<EraSpan>> {
    let Some(first) = events.first() else {
        return Ok(Vec::new());
    };
    let heights = events.iter().map(EraChangeEvent::height).collect::<Result<Vec<_>>>()?;

    let first_height = heights[0];
    if first_height == 0 {
        return Err(ReportError::MalformedEventData(format!(
            "first era change at genesis ({:?}) leaves no room for era 0",
            first.block_id
        )));
    }

    let mut spans = Vec::with_capacity(events.len());
    spans.push(EraSpan { era_index: 0, span: BlockSpan { start: 0, end: first_height - 1 } });

    for (idx, pair) in heights.windows(2).enumerate() {
        let (start, next) = (pair[0], pair[1]);
        let event = &events[idx];
        if next <= start {
            return Err(ReportError::MalformedEventData(format!(
                "era change at {:?} does not follow {:?}",
                events[idx + 1].block_id, event.block_id
            )));
        }
        let era_index = event.era_index.checked_add(1).ok_or_else(|| {
            ReportError::MalformedEventData(format!("era index overflow at {:?}", event.block_id))
        })?;
        spans.push(EraSpan { era_index, span: BlockSpan { start, end: next - 1 } });
    }
    Ok(spans)
}

/// Resolves the era history into [`EraBlockRange`]s with boundary hashes.
#[derive(Debug, Clone)]
pub struct EraIndexResolver<L, H> {
    events: L,
    hashes: H,
    concurrency: usize,
}

impl<L: EraEventLog, H: BlockHashLookup> EraIndexResolver<L, H> {
    /// Resolver reading events from `events` and hashes from `hashes`.
    pub const fn new(events: L, hashes: H) -> Self {
        Self { events, hashes, concurrency: DEFAULT_LOOKUP_CONCURRENCY }
    }

    /// Bound the number of ranges whose hashes are looked up concurrently.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Fetch every era change event and resolve the completed eras.
    pub async fn resolve(&self) -> Result<Vec<EraBlockRange>> {
        let events = self.events.era_change_events().await?;
        info!(events = events.len(), "Fetched era change events");
        self.resolve_events(&events).await
    }

    /// Resolve the completed eras of an already fetched event list, in era order.
    pub async fn resolve_events(&self, events: &[EraChangeEvent]) -> Result<Vec<EraBlockRange>> {
        let spans = plan_era_spans(events)?;
        let ranges: Vec<EraBlockRange> = stream::iter(spans)
            .map(|era| self.resolve_span(era))
            .buffered(self.concurrency)
            .try_collect()
            .await?;
        info!(eras = ranges.len(), "Resolved era block ranges");
        Ok(ranges)
    }

    async fn resolve_span(&self, era: EraSpan) -> Result<EraBlockRange> {
        let (block_start_hash, block_end_hash) = future::try_join(
            self.hashes.block_hash(era.span.start),
            self.hashes.block_hash(era.span.end),
        )
        .await?;
        debug!(era = era.era_index, start = era.span.start, end = era.span.end, "Resolved era");
        Ok(EraBlockRange {
            era_index: era.era_index,
            block_start: era.span.start,
            block_start_hash,
            block_end: era.span.end,
            block_end_hash,
        })
    }
}
