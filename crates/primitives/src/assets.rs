//! Assets tracked by the volume reports.

/// A token whose volume is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
    /// Native ROOT token
    Root,
    /// XRP
    Xrp,
    /// Vortex
    Vtx,
    /// Bridged ETH
    Eth,
    /// Bridged ASTO
    Asto,
}

impl Asset {
    /// Every asset, in transfer report column order.
    pub const ALL: [Self; 5] = [Self::Root, Self::Xrp, Self::Vtx, Self::Eth, Self::Asto];

    /// Assets that can be bridged in as ERC20 deposits, in report column order.
    pub const BRIDGED: [Self; 3] = [Self::Xrp, Self::Eth, Self::Asto];

    /// Number of decimals of the on-chain integer amount.
    pub const fn decimals(self) -> u32 {
        match self {
            Self::Root | Self::Xrp | Self::Vtx => 6,
            Self::Eth | Self::Asto => 18,
        }
    }

    /// Asset id in the assets pallet. ROOT is native and has none.
    pub const fn asset_id(self) -> Option<u64> {
        match self {
            Self::Root => None,
            Self::Xrp => Some(2),
            Self::Vtx => Some(3),
            Self::Eth => Some(1124),
            Self::Asto => Some(4196),
        }
    }

    /// Resolve the discriminator used by balance transfers: `ROOT` for the
    /// native token, the decimal asset id otherwise.
    pub fn from_transfer_id(id: &str) -> Option<Self> {
        if id == "ROOT" {
            return Some(Self::Root);
        }
        id.parse::<u64>().ok().and_then(Self::from_asset_id)
    }

    /// Resolve an assets pallet id.
    pub fn from_asset_id(id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|asset| asset.asset_id() == Some(id))
    }
}
