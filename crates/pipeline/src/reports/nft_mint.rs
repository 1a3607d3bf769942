use async_trait::async_trait;
use primitives::{
    EraBlockRange, Result, records::MintRecord, reduce::CollectionTally, sources::ArchiveQuery,
};
use tables::ReportFile;

use crate::EraReport;

/// Minted collections and tokens per era.
#[derive(Debug, Clone)]
pub struct NftMintVolume<A> {
    archive: A,
}

impl<A> NftMintVolume<A> {
    /// Report over `archive` mint events.
    pub const fn new(archive: A) -> Self {
        Self { archive }
    }
}

#[async_trait]
impl<A: ArchiveQuery> EraReport for NftMintVolume<A> {
    type Records = Vec<MintRecord>;
    type Metrics = CollectionTally;

    const FILE: ReportFile = ReportFile::NftMintVolume;
    const COLUMNS: &'static [&'static str] = &["Total Minted Collection", "Total Mint NFTs"];

    async fn query(&self, range: &EraBlockRange) -> Result<Vec<MintRecord>> {
        self.archive.nft_mints(range.span()).await
    }

    fn reduce(&self, records: Vec<MintRecord>) -> CollectionTally {
        CollectionTally::from_records(&records)
    }

    fn shape(&self, tally: CollectionTally) -> Vec<String> {
        vec![tally.collections().to_string(), tally.items().to_string()]
    }
}
