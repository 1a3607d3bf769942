//! Capabilities the pipeline consumes from external collaborators.
//!
//! Network clients implement these; tests substitute in-memory fakes.
use async_trait::async_trait;

use crate::{
    BlockSpan, EraChangeEvent, Result,
    records::{
        BlockActivity, BridgedMintRecord, EvmTransaction, IssuedRecord, MintRecord,
        StakingSnapshot, TransferRecord,
    },
};

/// Ordered log of era change events.
#[async_trait]
pub trait EraEventLog: Send + Sync {
    /// Every era change event, ascending by block height.
    async fn era_change_events(&self) -> Result<Vec<EraChangeEvent>>;
}

/// Resolve a block height to its canonical hash.
#[async_trait]
pub trait BlockHashLookup: Send + Sync {
    /// Hash of the block at `height`, hex encoded with a `0x` prefix.
    async fn block_hash(&self, height: u64) -> Result<String>;
}

/// Range scoped queries against the indexed archive.
#[async_trait]
pub trait ArchiveQuery: Send + Sync {
    /// Blocks in `span` holding at least one signed extrinsic.
    async fn signed_activity(&self, span: BlockSpan) -> Result<Vec<BlockActivity>>;

    /// Completed balance transfers in `span`.
    async fn transfers(&self, span: BlockSpan) -> Result<Vec<TransferRecord>>;

    /// Bridge deposits (`Assets.Issued` without an extrinsic) in `span`.
    async fn bridged_issuances(&self, span: BlockSpan) -> Result<Vec<IssuedRecord>>;

    /// Bridged NFT mints in `span`.
    async fn bridged_mints(&self, span: BlockSpan) -> Result<Vec<BridgedMintRecord>>;

    /// Native NFT mints in `span`.
    async fn nft_mints(&self, span: BlockSpan) -> Result<Vec<MintRecord>>;
}

/// Range scoped queries against the EVM ledger explorer.
#[async_trait]
pub trait EvmQuery: Send + Sync {
    /// EVM transactions in `span`.
    async fn transactions(&self, span: BlockSpan) -> Result<Vec<EvmTransaction>>;
}

/// Staking state snapshots read from node storage.
#[async_trait]
pub trait StakingQuery: Send + Sync {
    /// Staking state of `era` as of block `at`.
    async fn staking_snapshot(&self, at: &str, era: u32) -> Result<StakingSnapshot>;
}
