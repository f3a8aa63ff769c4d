use {
    super::U256,
    derive_more::{Display, From, Into},
    number::U256Ext,
};

/// Gas amount in gas units.
#[derive(Debug, Default, Display, Clone, Copy, Ord, Eq, PartialOrd, PartialEq, From, Into)]
pub struct Gas(pub U256);

impl From<u64> for Gas {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl TryFrom<Gas> for u64 {
    type Error = GasOverflow;

    fn try_from(value: Gas) -> Result<Self, Self::Error> {
        u64::try_from(value.0).map_err(|_| GasOverflow(value))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("gas amount {0} does not fit into 64 bits")]
pub struct GasOverflow(pub Gas);

/// Safety margin added on top of a simulated gas amount before it is used as
/// the gas limit of a real transaction, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasMargin(u32);

impl GasMargin {
    /// +20%.
    pub const DEFAULT: Self = Self(2_000);

    pub fn from_bps(bps: u32) -> Self {
        Self(bps)
    }

    /// `floor(gas * (10000 + margin) / 10000)`, saturating at `U256::MAX`.
    pub fn apply(&self, gas: Gas) -> Gas {
        let factor = U256::from(10_000u64 + u64::from(self.0));
        gas.0
            .checked_mul_ratio(&factor, &U256::from(10_000u64))
            .unwrap_or(U256::MAX)
            .into()
    }
}

impl Default for GasMargin {
    fn default() -> Self {
        Self::DEFAULT
    }
}
