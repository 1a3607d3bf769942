//! Shared entry point of the report binaries.
use std::path::Path;

use clap::Parser;
use config::Opts;
use dotenvy::dotenv;
use extractor::{NodeClient, StakingState};
use eyre::{OptionExt, WrapErr};
use network::{ArchiveClient, EvmExplorerClient};
use pipeline::{
    EraIndexResolver, aggregate,
    reports::{
        ActiveWallets, Erc20BridgeVolume, Erc721BridgeVolume, NftMintVolume, StakingVolume,
        TransfersVolume,
    },
    resolve_era_ranges,
};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

/// The pipeline step a binary runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Resolve and persist the era range table
    EraBlockRanges,
    /// Active wallets report
    ActiveWallets,
    /// Transfers volume report
    TransfersVolume,
    /// Staking volume report
    StakingVolume,
    /// Bridged ERC20 volume report
    Erc20BridgeVolume,
    /// Bridged ERC721 volume report
    Erc721BridgeVolume,
    /// NFT mint volume report
    NftMintVolume,
}

impl Job {
    /// Run this job against the endpoints in `opts`.
    pub async fn run(self, opts: &Opts) -> eyre::Result<()> {
        let data_dir: &Path = &opts.output.data_dir;
        let archive = || ArchiveClient::new(opts.archive.url.clone());
        let node = || NodeClient::new(opts.rpc.url.clone());

        let path = match self {
            Self::EraBlockRanges => {
                resolve_era_ranges(&EraIndexResolver::new(archive(), node()), data_dir).await?
            }
            Self::ActiveWallets => {
                let api_key = opts
                    .explorer
                    .api_key
                    .clone()
                    .ok_or_eyre("EVM_EXPLORER_API_KEY is required for the active wallets report")?;
                let evm = EvmExplorerClient::new(opts.explorer.url.clone(), api_key);
                aggregate(ActiveWallets::new(archive(), evm), data_dir).await?
            }
            Self::TransfersVolume => aggregate(TransfersVolume::new(archive()), data_dir).await?,
            Self::StakingVolume => {
                aggregate(StakingVolume::new(StakingState::new(node())), data_dir).await?
            }
            Self::Erc20BridgeVolume => {
                aggregate(Erc20BridgeVolume::new(archive()), data_dir).await?
            }
            Self::Erc721BridgeVolume => {
                aggregate(Erc721BridgeVolume::new(archive()), data_dir).await?
            }
            Self::NftMintVolume => aggregate(NftMintVolume::new(archive()), data_dir).await?,
        };
        info!(job = ?self, path = ?path, "Done");
        Ok(())
    }
}

/// Load the environment, parse options, install logging and run `job`.
pub async fn launch(job: Job) -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(&custom_env_file)
            .wrap_err_with(|| format!("loading env file {}", custom_env_file))?;
    } else {
        dotenv().ok();
    }

    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(job = ?job, data_dir = ?opts.output.data_dir, "Starting");
    job.run(&opts).await
}
