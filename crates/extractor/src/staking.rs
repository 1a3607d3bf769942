//! Staking pallet state: validators, per era exposures and total stake.
use async_trait::async_trait;
use codec::{Decode, Encode};
use primitives::{
    ReportError, Result,
    records::{StakingSnapshot, ValidatorExposure},
    sources::StakingQuery,
};
use tracing::debug;

use crate::storage::{StateSnapshot, StorageKey};

/// Accounts are 20 byte Ethereum style addresses.
pub type AccountId = [u8; 20];

const PALLET: &str = "Staking";

/// Stake a single nominator puts behind a validator.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct IndividualExposure {
    /// Nominator account
    pub who: AccountId,
    /// Stake in base units
    #[codec(compact)]
    pub value: u128,
}

/// Stake backing a validator in one era (`Staking.ErasStakers`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct Exposure {
    /// Own stake plus every nominator's stake
    #[codec(compact)]
    pub total: u128,
    /// Validator's own stake
    #[codec(compact)]
    pub own: u128,
    /// Nominators
    pub others: Vec<IndividualExposure>,
}

impl From<&Exposure> for ValidatorExposure {
    fn from(exposure: &Exposure) -> Self {
        Self { own: exposure.own, nominators: exposure.others.len() }
    }
}

/// Key prefix of `Staking.Validators`.
pub fn validators_prefix() -> StorageKey {
    StorageKey::prefix(PALLET, "Validators")
}

/// Key of `Staking.ErasTotalStake(era)`.
pub fn eras_total_stake_key(era: u32) -> StorageKey {
    StorageKey::prefix(PALLET, "ErasTotalStake").twox64_concat(&era.encode())
}

/// Key of `Staking.ErasStakers(era, validator)`.
pub fn eras_stakers_key(era: u32, validator: &AccountId) -> StorageKey {
    StorageKey::prefix(PALLET, "ErasStakers")
        .twox64_concat(&era.encode())
        .twox64_concat(validator)
}

/// Account encoded at the tail of a `Staking.Validators` key.
pub fn validator_from_key(key: &StorageKey) -> Result<AccountId> {
    let expected = 32 + 8 + 20;
    if key.0.len() != expected {
        return Err(ReportError::query(
            "node",
            format!("validator key {:?} is {} bytes, expected {}", key, key.0.len(), expected),
        ));
    }
    let mut account = AccountId::default();
    account.copy_from_slice(&key.0[expected - 20..]);
    Ok(account)
}

fn decode<T: Decode>(what: &str, mut bytes: &[u8]) -> Result<T> {
    T::decode(&mut bytes).map_err(|e| ReportError::query("node", format!("decoding {}: {}", what, e)))
}

/// Staking snapshots read from any [`StateSnapshot`].
#[derive(Debug, Clone)]
pub struct StakingState<S> {
    state: S,
}

impl<S: StateSnapshot> StakingState<S> {
    /// Wrap a state snapshot source.
    pub const fn new(state: S) -> Self {
        Self { state }
    }

    /// Every validator registered at block `at`.
    pub async fn validators(&self, at: &str) -> Result<Vec<AccountId>> {
        let keys = self.state.storage_keys(at, &validators_prefix()).await?;
        keys.iter().map(validator_from_key).collect()
    }

    /// `Staking.ErasTotalStake(era)` at block `at`; zero when unset.
    pub async fn total_stake(&self, at: &str, era: u32) -> Result<u128> {
        match self.state.storage(at, &eras_total_stake_key(era)).await? {
            Some(bytes) => decode("ErasTotalStake", &bytes),
            None => Ok(0),
        }
    }

    /// Exposure of each of `validators` in `era`, in the same order. Missing
    /// entries decode as an empty exposure.
    pub async fn exposures(
        &self,
        at: &str,
        era: u32,
        validators: &[AccountId],
    ) -> Result<Vec<Exposure>> {
        let keys: Vec<_> = validators.iter().map(|v| eras_stakers_key(era, v)).collect();
        let values = self.state.storage_batch(at, &keys).await?;
        values
            .into_iter()
            .map(|value| match value {
                Some(bytes) => decode("ErasStakers", &bytes),
                None => Ok(Exposure::default()),
            })
            .collect()
    }
}

#[async_trait]
impl<S: StateSnapshot> StakingQuery for StakingState<S> {
    async fn staking_snapshot(&self, at: &str, era: u32) -> Result<StakingSnapshot> {
        let total_stake = self.total_stake(at, era).await?;
        let validators = self.validators(at).await?;
        let exposures = self.exposures(at, era, &validators).await?;
        debug!(era, at, validators = validators.len(), "Read staking snapshot");
        Ok(StakingSnapshot {
            total_stake,
            exposures: exposures.iter().map(ValidatorExposure::from).collect(),
        })
    }
}
