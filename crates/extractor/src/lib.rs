//! Node JSON-RPC access: block hashes and state snapshots.
use std::time::Instant;

use alloy_json_rpc::{RpcRecv, RpcSend};
use alloy_rpc_client::{ClientBuilder, RpcClient};
use async_trait::async_trait;
use derive_more::Debug;
use primitives::{ReportError, Result, sources::BlockHashLookup};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Staking pallet storage
pub mod staking;
/// Storage keys and the snapshot capability
pub mod storage;

pub use staking::StakingState;
pub use storage::{StateSnapshot, StorageKey};

use storage::decode_hex;

/// Keys fetched per `state_getKeysPaged` call.
const KEYS_PAGE_SIZE: u32 = 1000;
/// Keys fetched per `state_queryStorageAt` call.
const QUERY_BATCH_SIZE: usize = 256;

#[derive(Debug, Deserialize)]
struct StorageChangeSet {
    changes: Vec<(String, Option<String>)>,
}

/// HTTP JSON-RPC client for an archive node.
#[derive(Debug, Clone)]
pub struct NodeClient {
    #[debug(skip)]
    client: RpcClient,
}

impl NodeClient {
    /// Create a client talking to `url`.
    pub fn new(url: Url) -> Self {
        Self { client: ClientBuilder::default().http(url) }
    }

    async fn call<P, R>(&self, method: &'static str, params: P) -> Result<R>
    where
        P: RpcSend,
        R: RpcRecv,
    {
        let start = Instant::now();
        let result = self
            .client
            .request(method, params)
            .await
            .map_err(|e| ReportError::query("node", format!("{}: {}", method, e)));
        debug!(method, duration_ms = start.elapsed().as_millis(), ok = result.is_ok(), "RPC call");
        result
    }
}

#[async_trait]
impl BlockHashLookup for NodeClient {
    async fn block_hash(&self, height: u64) -> Result<String> {
        let hash: Option<String> = self.call("chain_getBlockHash", (height,)).await?;
        hash.ok_or(ReportError::HashLookupFailure { height })
    }
}

#[async_trait]
impl StateSnapshot for NodeClient {
    async fn storage(&self, at: &str, key: &StorageKey) -> Result<Option<Vec<u8>>> {
        let value: Option<String> =
            self.call("state_getStorage", (key.to_hex(), at.to_owned())).await?;
        value.as_deref().map(decode_hex).transpose()
    }

    async fn storage_batch(&self, at: &str, keys: &[StorageKey]) -> Result<Vec<Option<Vec<u8>>>> {
        let mut values = Vec::with_capacity(keys.len());
        for chunk in keys.chunks(QUERY_BATCH_SIZE) {
            let hex_keys: Vec<String> = chunk.iter().map(StorageKey::to_hex).collect();
            let sets: Vec<StorageChangeSet> =
                self.call("state_queryStorageAt", (hex_keys.clone(), at.to_owned())).await?;

            // The node may reorder or omit keys; match them back up by key.
            let mut found = std::collections::HashMap::new();
            for (key, value) in sets.into_iter().flat_map(|set| set.changes) {
                found.insert(key.to_lowercase(), value);
            }
            for key in &hex_keys {
                let value = found.remove(key).flatten();
                values.push(value.as_deref().map(decode_hex).transpose()?);
            }
        }
        Ok(values)
    }

    async fn storage_keys(&self, at: &str, prefix: &StorageKey) -> Result<Vec<StorageKey>> {
        let prefix_hex = prefix.to_hex();
        let mut keys = Vec::new();
        let mut start_key: Option<String> = None;
        loop {
            let page: Vec<String> = self
                .call(
                    "state_getKeysPaged",
                    (prefix_hex.clone(), KEYS_PAGE_SIZE, start_key.clone(), at.to_owned()),
                )
                .await?;
            let full = page.len() == KEYS_PAGE_SIZE as usize;
            start_key = page.last().cloned();
            for key in &page {
                keys.push(StorageKey::from_hex(key)?);
            }
            if !full {
                break;
            }
        }
        Ok(keys)
    }
}
