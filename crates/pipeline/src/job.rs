use std::time::Duration;

use async_trait::async_trait;
use primitives::{EraBlockRange, MetricRow, Result};
use tables::ReportFile;
use tracing::info;

/// Delay between eras for jobs issuing range scoped queries.
pub const LIGHT_THROTTLE: Duration = Duration::from_millis(250);
/// Delay between eras for jobs reading node state snapshots.
pub const SNAPSHOT_THROTTLE: Duration = Duration::from_millis(1000);

/// One report: how to query an era, reduce the records and shape the row.
#[async_trait]
pub trait EraReport: Send + Sync {
    /// Raw records fetched for one era.
    type Records: Send;
    /// Metrics reduced from those records.
    type Metrics: Send;

    /// Table the report is persisted as.
    const FILE: ReportFile;
    /// Metric column names, following the shared leading columns.
    const COLUMNS: &'static [&'static str];
    /// Pause between two eras.
    const THROTTLE: Duration = LIGHT_THROTTLE;

    /// Fetch the records of `range`.
    async fn query(&self, range: &EraBlockRange) -> Result<Self::Records>;

    /// Reduce the records of one era.
    fn reduce(&self, records: Self::Records) -> Self::Metrics;

    /// Render metrics as cells in [`Self::COLUMNS`] order.
    fn shape(&self, metrics: Self::Metrics) -> Vec<String>;
}

/// Runs an [`EraReport`] over every era, oldest first, one era at a time.
#[derive(Debug, Clone)]
pub struct AggregationJob<R> {
    report: R,
}

impl<R: EraReport> AggregationJob<R> {
    /// Job driving `report`.
    pub const fn new(report: R) -> Self {
        Self { report }
    }

    /// Full header: the leading columns then the report's metric columns.
    pub fn header() -> Vec<&'static str> {
        MetricRow::LEADING_HEADER.iter().chain(R::COLUMNS).copied().collect()
    }

    /// Produce one row per era. The first failing query aborts the whole run
    /// and no rows are returned.
    pub async fn run(&self, ranges: &[EraBlockRange]) -> Result<Vec<MetricRow>> {
        let mut ordered: Vec<&EraBlockRange> = ranges.iter().collect();
        ordered.sort_by_key(|range| range.era_index);

        let mut rows = Vec::with_capacity(ordered.len());
        for (idx, range) in ordered.iter().enumerate() {
            if idx > 0 {
                tokio::time::sleep(R::THROTTLE).await;
            }
            let records = self.report.query(range).await?;
            let metrics = self.report.reduce(records);
            let cells = self.report.shape(metrics);
            info!(
                report = %R::FILE,
                era = range.era_index,
                block_start = range.block_start,
                block_end = range.block_end,
                "Processed era"
            );
            rows.push(MetricRow::new(range, cells));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::ReportError;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    /// Counts the blocks of each era; fails on `fail_at`.
    #[derive(Default, Clone)]
    struct BlockCount {
        fail_at: Option<u32>,
        seen: Arc<Mutex<Vec<(u32, Instant)>>>,
    }

    #[async_trait]
    impl EraReport for BlockCount {
        type Records = u64;
        type Metrics = u64;

        const FILE: ReportFile = ReportFile::ActiveWallets;
        const COLUMNS: &'static [&'static str] = &["Blocks"];

        async fn query(&self, range: &EraBlockRange) -> Result<u64> {
            self.seen.lock().unwrap().push((range.era_index, Instant::now()));
            if self.fail_at == Some(range.era_index) {
                return Err(ReportError::query("test", "unreachable"));
            }
            Ok(range.block_end - range.block_start + 1)
        }

        fn reduce(&self, records: u64) -> u64 {
            records
        }

        fn shape(&self, metrics: u64) -> Vec<String> {
            vec![metrics.to_string()]
        }
    }

    fn range(era_index: u32, block_start: u64, block_end: u64) -> EraBlockRange {
        EraBlockRange {
            era_index,
            block_start,
            block_start_hash: format!("0x{:x}", block_start),
            block_end,
            block_end_hash: format!("0x{:x}", block_end),
        }
    }

    #[test]
    fn header_prefixes_the_leading_columns() {
        assert_eq!(AggregationJob::<BlockCount>::header(), vec![
            "Era Index",
            "From Block",
            "To Block",
            "Blocks"
        ]);
    }

    #[tokio::test(start_paused = true)]
    async fn eras_run_in_ascending_order_with_a_pause_between() {
        let report = BlockCount::default();
        let job = AggregationJob::new(report.clone());
        let ranges = [range(2, 200, 299), range(0, 0, 99), range(1, 100, 149)];

        let rows = job.run(&ranges).await.unwrap();
        let cells: Vec<_> = rows.into_iter().map(MetricRow::into_record).collect();
        assert_eq!(cells, vec![
            vec!["0", "0", "99", "100"],
            vec!["1", "100", "149", "50"],
            vec!["2", "200", "299", "100"],
        ]);

        let seen = report.seen.lock().unwrap();
        assert_eq!(seen.iter().map(|(era, _)| *era).collect::<Vec<_>>(), vec![0, 1, 2]);
        for pair in seen.windows(2) {
            assert!(pair[1].1 - pair[0].1 >= LIGHT_THROTTLE);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_pause_after_the_last_era() {
        let job = AggregationJob::new(BlockCount::default());
        let started = Instant::now();
        job.run(&[range(0, 0, 9)]).await.unwrap();
        assert!(started.elapsed() < LIGHT_THROTTLE);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failing_era_aborts_the_run() {
        let report = BlockCount { fail_at: Some(1), ..Default::default() };
        let job = AggregationJob::new(report.clone());

        let err = job.run(&[range(0, 0, 9), range(1, 10, 19), range(2, 20, 29)]).await.unwrap_err();
        assert!(matches!(err, ReportError::QueryFailure { .. }));
        // era 2 is never queried
        assert_eq!(report.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn no_ranges_no_rows() {
        let rows = AggregationJob::new(BlockCount::default()).run(&[]).await.unwrap();
        assert!(rows.is_empty());
    }
}
