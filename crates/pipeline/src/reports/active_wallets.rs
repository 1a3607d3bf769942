use async_trait::async_trait;
use primitives::{
    EraBlockRange, Result,
    records::{BlockActivity, EvmTransaction},
    reduce::distinct_actors_across,
    sources::{ArchiveQuery, EvmQuery},
};
use tables::ReportFile;

use crate::EraReport;

/// Native and EVM activity of one era.
#[derive(Debug, Clone, Default)]
pub struct ActivityRecords {
    /// Blocks holding signed extrinsics
    pub blocks: Vec<BlockActivity>,
    /// EVM transactions
    pub evm: Vec<EvmTransaction>,
}

/// Wallets and transactions of one era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityMetrics {
    /// Distinct native signers plus distinct EVM senders
    pub active_wallets: usize,
    /// Signed extrinsics, EVM transactions and calls with an origin
    pub transactions: usize,
}

/// Active wallets and transaction counts per era.
#[derive(Debug, Clone)]
pub struct ActiveWallets<A, E> {
    archive: A,
    evm: E,
}

impl<A, E> ActiveWallets<A, E> {
    /// Report over the native `archive` and the `evm` ledger.
    pub const fn new(archive: A, evm: E) -> Self {
        Self { archive, evm }
    }
}

#[async_trait]
impl<A: ArchiveQuery, E: EvmQuery> EraReport for ActiveWallets<A, E> {
    type Records = ActivityRecords;
    type Metrics = ActivityMetrics;

    const FILE: ReportFile = ReportFile::ActiveWallets;
    const COLUMNS: &'static [&'static str] = &["Active Wallets", "Transactions"];

    async fn query(&self, range: &EraBlockRange) -> Result<ActivityRecords> {
        let blocks = self.archive.signed_activity(range.span()).await?;
        let evm = self.evm.transactions(range.span()).await?;
        Ok(ActivityRecords { blocks, evm })
    }

    fn reduce(&self, records: ActivityRecords) -> ActivityMetrics {
        let signers: Vec<&str> = records
            .blocks
            .iter()
            .flat_map(|block| &block.extrinsics)
            .filter_map(|extrinsic| extrinsic.signer.as_deref())
            .collect();
        let calls = records
            .blocks
            .iter()
            .flat_map(|block| &block.calls)
            .filter(|call| call.has_origin())
            .count();

        ActivityMetrics {
            active_wallets: distinct_actors_across(
                signers.iter().copied(),
                records.evm.iter().map(|tx| tx.from.as_str()),
            ),
            transactions: signers.len() + records.evm.len() + calls,
        }
    }

    fn shape(&self, metrics: ActivityMetrics) -> Vec<String> {
        vec![metrics.active_wallets.to_string(), metrics.transactions.to_string()]
    }
}
