//! Era metrics configuration
use std::path::PathBuf;

use clap::Parser;
use url::Url;

/// Default indexed archive GraphQL endpoint
pub const DEFAULT_ARCHIVE_URL: &str = "https://rootnet-mainnet.hasura.app/v1/graphql";
/// Default EVM explorer GraphQL endpoint
pub const DEFAULT_EVM_EXPLORER_URL: &str = "https://ap-southeast-2.aws.realm.mongodb.com/api/client/v2.0/app/mainnet-explorer-app-ldwek/graphql";
/// Default archive node JSON-RPC endpoint
pub const DEFAULT_NODE_RPC_URL: &str = "https://root.rootnet.live/archive";

/// Indexed archive configuration options
#[derive(Debug, Clone, Parser)]
pub struct ArchiveOpts {
    /// Archive GraphQL URL
    #[clap(id = "archive_url", long = "archive-url", env = "ARCHIVE_GRAPHQL_URL", default_value = DEFAULT_ARCHIVE_URL)]
    pub url: Url,
}

/// EVM explorer configuration options
#[derive(Debug, Clone, Parser)]
pub struct ExplorerOpts {
    /// EVM explorer GraphQL URL
    #[clap(id = "evm_explorer_url", long = "evm-explorer-url", env = "EVM_EXPLORER_URL", default_value = DEFAULT_EVM_EXPLORER_URL)]
    pub url: Url,
    /// EVM explorer API key
    #[clap(long = "evm-explorer-api-key", env = "EVM_EXPLORER_API_KEY")]
    pub api_key: Option<String>,
}

/// Node RPC configuration options
#[derive(Debug, Clone, Parser)]
pub struct RpcOpts {
    /// Archive node HTTP JSON-RPC URL
    #[clap(id = "node_rpc_url", long = "node-rpc-url", env = "NODE_RPC_URL", default_value = DEFAULT_NODE_RPC_URL)]
    pub url: Url,
}

/// Report output configuration options
#[derive(Debug, Clone, Parser)]
pub struct OutputOpts {
    /// Directory holding the range table and every report
    #[clap(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

/// CLI options shared by every report entry point
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Indexed archive configuration
    #[clap(flatten)]
    pub archive: ArchiveOpts,

    /// EVM explorer configuration
    #[clap(flatten)]
    pub explorer: ExplorerOpts,

    /// Node RPC configuration
    #[clap(flatten)]
    pub rpc: RpcOpts,

    /// Output configuration
    #[clap(flatten)]
    pub output: OutputOpts,
}
