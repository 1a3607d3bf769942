//! Domain records returned by the external sources, already stripped of their
//! transport shape.
use num_bigint::BigUint;

/// A signed or unsigned extrinsic inside an archive block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtrinsicRecord {
    /// Signer address, `None` for unsigned extrinsics
    pub signer: Option<String>,
}

/// A dispatched call inside an archive block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallRecord {
    /// Call name, e.g. `Balances.transfer`
    pub name: String,
    /// Origin kind (`Signed`, `Root`, `None`, ...), `None` when absent.
    /// Origins without a kind carry their raw JSON.
    pub origin_kind: Option<String>,
}

impl CallRecord {
    /// A call counts as a transaction when it has an origin other than `None`.
    pub fn has_origin(&self) -> bool {
        self.origin_kind.as_deref().is_some_and(|kind| kind != "None")
    }
}

/// Native ledger activity of a single block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockActivity {
    /// Block height
    pub height: u64,
    /// Extrinsics in the block
    pub extrinsics: Vec<ExtrinsicRecord>,
    /// Calls in the block
    pub calls: Vec<CallRecord>,
}

/// A transaction on the EVM ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmTransaction {
    /// Transaction hash
    pub hash: String,
    /// Sender address
    pub from: String,
}

/// A completed balance transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    /// Asset discriminator, `ROOT` or a decimal asset id
    pub asset_id: String,
    /// Transferred amount in base units
    pub amount: BigUint,
}

/// An `Assets.Issued` event emitted without an extrinsic, i.e. a bridge deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRecord {
    /// Assets pallet id
    pub asset_id: u64,
    /// Issued amount in base units
    pub total_supply: BigUint,
}

/// A `Nft.BridgedMint` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgedMintRecord {
    /// Collection id
    pub collection_id: u64,
    /// Serial numbers minted on this chain
    pub serial_numbers: Vec<u64>,
}

/// A `Nft.Mint` event covering the inclusive serial range `start..=end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRecord {
    /// Collection id
    pub collection_id: u64,
    /// First serial number
    pub start: u64,
    /// Last serial number, inclusive
    pub end: u64,
}

/// Stake exposure of one validator in one era.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidatorExposure {
    /// Validator's own stake in base units
    pub own: u128,
    /// Number of nominators backing the validator
    pub nominators: usize,
}

/// Staking state read at the last block of an era.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StakingSnapshot {
    /// `Staking.ErasTotalStake` for the era, in base units
    pub total_stake: u128,
    /// Exposure of every validator registered at the snapshot
    pub exposures: Vec<ValidatorExposure>,
}
