use async_trait::async_trait;
use primitives::{
    EraBlockRange, Result,
    assets::Asset,
    records::{BridgedMintRecord, IssuedRecord},
    reduce::{CollectionTally, TypedSum},
    sources::ArchiveQuery,
    units::{Precision, scale_down},
};
use tables::ReportFile;

use crate::EraReport;

/// Fractional digits kept for bridged token volumes.
const BRIDGE_PRECISION: Precision = Precision::Fixed(4);

/// Bridged ERC20 deposits per asset per era.
#[derive(Debug, Clone)]
pub struct Erc20BridgeVolume<A> {
    archive: A,
}

impl<A> Erc20BridgeVolume<A> {
    /// Report over `archive` issuance events.
    pub const fn new(archive: A) -> Self {
        Self { archive }
    }
}

fn bridged_asset(asset_id: &u64) -> Option<Asset> {
    Asset::from_asset_id(*asset_id).filter(|asset| Asset::BRIDGED.contains(asset))
}

#[async_trait]
impl<A: ArchiveQuery> EraReport for Erc20BridgeVolume<A> {
    type Records = Vec<IssuedRecord>;
    type Metrics = TypedSum<Asset>;

    const FILE: ReportFile = ReportFile::Erc20BridgeVolume;
    const COLUMNS: &'static [&'static str] =
        &["Total Bridged XRP", "Total Bridged ETH", "Total Bridged ASTO"];

    async fn query(&self, range: &EraBlockRange) -> Result<Vec<IssuedRecord>> {
        self.archive.bridged_issuances(range.span()).await
    }

    fn reduce(&self, records: Vec<IssuedRecord>) -> TypedSum<Asset> {
        TypedSum::from_records(
            Asset::BRIDGED,
            records.into_iter().map(|r| (r.asset_id, r.total_supply)),
            bridged_asset,
        )
    }

    fn shape(&self, totals: TypedSum<Asset>) -> Vec<String> {
        Asset::BRIDGED
            .into_iter()
            .map(|asset| scale_down(&totals.total(asset), asset.decimals(), BRIDGE_PRECISION))
            .collect()
    }
}

/// Bridged ERC721 collections and tokens per era.
#[derive(Debug, Clone)]
pub struct Erc721BridgeVolume<A> {
    archive: A,
}

impl<A> Erc721BridgeVolume<A> {
    /// Report over `archive` bridged mint events.
    pub const fn new(archive: A) -> Self {
        Self { archive }
    }
}

#[async_trait]
impl<A: ArchiveQuery> EraReport for Erc721BridgeVolume<A> {
    type Records = Vec<BridgedMintRecord>;
    type Metrics = CollectionTally;

    const FILE: ReportFile = ReportFile::Erc721BridgeVolume;
    const COLUMNS: &'static [&'static str] = &["Total Bridged Collection", "Total Bridged NFTs"];

    async fn query(&self, range: &EraBlockRange) -> Result<Vec<BridgedMintRecord>> {
        self.archive.bridged_mints(range.span()).await
    }

    fn reduce(&self, records: Vec<BridgedMintRecord>) -> CollectionTally {
        CollectionTally::from_records(&records)
    }

    fn shape(&self, tally: CollectionTally) -> Vec<String> {
        vec![tally.collections().to_string(), tally.items().to_string()]
    }
}
