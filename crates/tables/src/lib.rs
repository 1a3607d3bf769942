//! Persisted report tables.
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Loading the era range table
pub mod reader;
/// Writing report tables
pub mod writer;

pub use reader::EraRangeReader;
pub use writer::TabularReportWriter;

/// Every table the pipeline persists, one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFile {
    /// Resolved era block ranges, read back by every other report
    EraBlockRanges,
    /// Active wallets and transactions per era
    ActiveWallets,
    /// Transfer volume per asset per era
    TransfersVolume,
    /// Total stake and stakers per era
    StakingVolume,
    /// Bridged ERC20 volume per era
    Erc20BridgeVolume,
    /// Bridged ERC721 collections and tokens per era
    Erc721BridgeVolume,
    /// Minted collections and tokens per era
    NftMintVolume,
}

impl ReportFile {
    /// File name under the data directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::EraBlockRanges => "0_era_block_ranges.csv",
            Self::ActiveWallets => "1_era_active_wallets.csv",
            Self::TransfersVolume => "2_era_transfers_volume.csv",
            Self::StakingVolume => "3_era_staking_volume.csv",
            Self::Erc20BridgeVolume => "4_era_erc20_bridge_volume.csv",
            Self::Erc721BridgeVolume => "5_era_erc721_bridge_volume.csv",
            Self::NftMintVolume => "6_era_nft_mint_volume.csv",
        }
    }

    /// Full path of this table inside `data_dir`.
    pub fn path_in(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }
}

impl fmt::Display for ReportFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
