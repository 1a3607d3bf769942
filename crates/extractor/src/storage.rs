//! Node storage keys and the snapshot capability.
use std::fmt;

use async_trait::async_trait;
use primitives::{ReportError, Result};
use sp_crypto_hashing::{twox_64, twox_128};

/// A raw storage key.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct StorageKey(pub Vec<u8>);

impl StorageKey {
    /// Key prefix of the storage item `item` of pallet `pallet`.
    pub fn prefix(pallet: &str, item: &str) -> Self {
        let mut key = Vec::with_capacity(32);
        key.extend_from_slice(&twox_128(pallet.as_bytes()));
        key.extend_from_slice(&twox_128(item.as_bytes()));
        Self(key)
    }

    /// Append a `Twox64Concat` hashed map key.
    pub fn twox64_concat(mut self, encoded: &[u8]) -> Self {
        self.0.extend_from_slice(&twox_64(encoded));
        self.0.extend_from_slice(encoded);
        self
    }

    /// `0x` prefixed hex encoding, as used on the wire.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    /// Parse a `0x` prefixed hex key.
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_hex(s).map(Self)
    }

    /// Whether this key starts with `prefix`.
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Decode a `0x` prefixed hex string returned by the node.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s.trim_start_matches("0x"))
        .map_err(|e| ReportError::query("node", format!("invalid hex {:?}: {}", s, e)))
}

/// Read access to chain state as of a given block.
#[async_trait]
pub trait StateSnapshot: Send + Sync {
    /// Value stored under `key` at block `at`.
    async fn storage(&self, at: &str, key: &StorageKey) -> Result<Option<Vec<u8>>>;

    /// Values stored under each of `keys` at block `at`, in the same order.
    async fn storage_batch(&self, at: &str, keys: &[StorageKey]) -> Result<Vec<Option<Vec<u8>>>>;

    /// Every key starting with `prefix` at block `at`.
    async fn storage_keys(&self, at: &str, prefix: &StorageKey) -> Result<Vec<StorageKey>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches_known_pallet_hash() {
        // twox128("System") ++ twox128("Account")
        let key = StorageKey::prefix("System", "Account");
        assert_eq!(
            key.to_hex(),
            "0x26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9"
        );
    }

    #[test]
    fn twox64_concat_keeps_the_raw_key() {
        let key = StorageKey::prefix("Staking", "ErasTotalStake").twox64_concat(&7u32.to_le_bytes());
        assert_eq!(key.0.len(), 32 + 8 + 4);
        assert_eq!(&key.0[40..], &[7, 0, 0, 0]);
    }

    #[test]
    fn hex_round_trips() {
        let key = StorageKey(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(StorageKey::from_hex(&key.to_hex()).unwrap(), key);
        assert!(StorageKey::from_hex("0xzz").is_err());
    }
}
