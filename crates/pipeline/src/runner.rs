use std::path::{Path, PathBuf};

use primitives::{
    EraBlockRange, MetricRow, Result,
    sources::{BlockHashLookup, EraEventLog},
};
use tables::{EraRangeReader, ReportFile, TabularReportWriter};
use tracing::info;

use crate::{AggregationJob, EraIndexResolver, EraReport};

/// Resolve the era history and persist it as the range table in `data_dir`.
pub async fn resolve_era_ranges<L, H>(
    resolver: &EraIndexResolver<L, H>,
    data_dir: &Path,
) -> Result<PathBuf>
where
    L: EraEventLog,
    H: BlockHashLookup,
{
    let ranges = resolver.resolve().await?;
    TabularReportWriter::new(data_dir).write(
        ReportFile::EraBlockRanges,
        EraBlockRange::HEADER,
        ranges.iter().map(EraBlockRange::to_record),
    )
}

/// Run `report` over the range table in `data_dir` and persist its rows there.
///
/// Nothing is written unless every era succeeds.
pub async fn aggregate<R: EraReport>(report: R, data_dir: &Path) -> Result<PathBuf> {
    let ranges = EraRangeReader::new(ReportFile::EraBlockRanges.path_in(data_dir)).read()?;
    info!(report = %R::FILE, eras = ranges.len(), "Starting report");

    let rows = AggregationJob::new(report).run(&ranges).await?;
    TabularReportWriter::new(data_dir).write(
        R::FILE,
        AggregationJob::<R>::header(),
        rows.into_iter().map(MetricRow::into_record),
    )
}
