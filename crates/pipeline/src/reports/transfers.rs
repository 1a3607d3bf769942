use async_trait::async_trait;
use primitives::{
    EraBlockRange, Result,
    assets::Asset,
    records::TransferRecord,
    reduce::TypedSum,
    sources::ArchiveQuery,
    units::{Precision, scale_down},
};
use tables::ReportFile;

use crate::EraReport;

/// Completed transfer volume per asset per era.
#[derive(Debug, Clone)]
pub struct TransfersVolume<A> {
    archive: A,
}

impl<A> TransfersVolume<A> {
    /// Report over `archive` transfers.
    pub const fn new(archive: A) -> Self {
        Self { archive }
    }
}

#[async_trait]
impl<A: ArchiveQuery> EraReport for TransfersVolume<A> {
    type Records = Vec<TransferRecord>;
    type Metrics = TypedSum<Asset>;

    const FILE: ReportFile = ReportFile::TransfersVolume;
    const COLUMNS: &'static [&'static str] =
        &["Total ROOT", "Total XRP", "Total VTX", "Total ETH", "Total ASTO"];

    async fn query(&self, range: &EraBlockRange) -> Result<Vec<TransferRecord>> {
        self.archive.transfers(range.span()).await
    }

    fn reduce(&self, records: Vec<TransferRecord>) -> TypedSum<Asset> {
        TypedSum::from_records(
            Asset::ALL,
            records.into_iter().map(|t| (t.asset_id, t.amount)),
            |id: &String| Asset::from_transfer_id(id),
        )
    }

    fn shape(&self, totals: TypedSum<Asset>) -> Vec<String> {
        Asset::ALL
            .into_iter()
            .map(|asset| scale_down(&totals.total(asset), asset.decimals(), Precision::Full))
            .collect()
    }
}
