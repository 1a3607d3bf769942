//! The six era reports, each an [`EraReport`](crate::EraReport).

mod active_wallets;
mod bridge;
mod nft_mint;
mod staking;
mod transfers;

pub use active_wallets::{ActiveWallets, ActivityMetrics, ActivityRecords};
pub use bridge::{Erc20BridgeVolume, Erc721BridgeVolume};
pub use nft_mint::NftMintVolume;
pub use staking::{StakingMetrics, StakingVolume};
pub use transfers::TransfersVolume;

#[cfg(test)]
pub(crate) mod fakes {
    //! In-memory sources keyed by block span.
    use std::collections::HashMap;

    use async_trait::async_trait;
    use primitives::{
        BlockSpan, EraBlockRange, Result,
        records::{
            BlockActivity, BridgedMintRecord, EvmTransaction, IssuedRecord, MintRecord,
            StakingSnapshot, TransferRecord,
        },
        sources::{ArchiveQuery, EvmQuery, StakingQuery},
    };

    pub(crate) fn range(era_index: u32, block_start: u64, block_end: u64) -> EraBlockRange {
        EraBlockRange {
            era_index,
            block_start,
            block_start_hash: format!("0x{:x}", block_start),
            block_end,
            block_end_hash: format!("0x{:x}", block_end),
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeArchive {
        pub(crate) activity: HashMap<BlockSpan, Vec<BlockActivity>>,
        pub(crate) transfers: HashMap<BlockSpan, Vec<TransferRecord>>,
        pub(crate) issuances: HashMap<BlockSpan, Vec<IssuedRecord>>,
        pub(crate) bridged_mints: HashMap<BlockSpan, Vec<BridgedMintRecord>>,
        pub(crate) mints: HashMap<BlockSpan, Vec<MintRecord>>,
    }

    fn get<T: Clone>(map: &HashMap<BlockSpan, Vec<T>>, span: BlockSpan) -> Vec<T> {
        map.get(&span).cloned().unwrap_or_default()
    }

    #[async_trait]
    impl ArchiveQuery for FakeArchive {
        async fn signed_activity(&self, span: BlockSpan) -> Result<Vec<BlockActivity>> {
            Ok(get(&self.activity, span))
        }

        async fn transfers(&self, span: BlockSpan) -> Result<Vec<TransferRecord>> {
            Ok(get(&self.transfers, span))
        }

        async fn bridged_issuances(&self, span: BlockSpan) -> Result<Vec<IssuedRecord>> {
            Ok(get(&self.issuances, span))
        }

        async fn bridged_mints(&self, span: BlockSpan) -> Result<Vec<BridgedMintRecord>> {
            Ok(get(&self.bridged_mints, span))
        }

        async fn nft_mints(&self, span: BlockSpan) -> Result<Vec<MintRecord>> {
            Ok(get(&self.mints, span))
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeEvm(pub(crate) HashMap<BlockSpan, Vec<EvmTransaction>>);

    #[async_trait]
    impl EvmQuery for FakeEvm {
        async fn transactions(&self, span: BlockSpan) -> Result<Vec<EvmTransaction>> {
            Ok(get(&self.0, span))
        }
    }

    /// Snapshots keyed by `(block hash, era)`.
    #[derive(Default)]
    pub(crate) struct FakeStaking(pub(crate) HashMap<(String, u32), StakingSnapshot>);

    #[async_trait]
    impl StakingQuery for FakeStaking {
        async fn staking_snapshot(&self, at: &str, era: u32) -> Result<StakingSnapshot> {
            Ok(self.0.get(&(at.to_owned(), era)).cloned().unwrap_or_default())
        }
    }
}
