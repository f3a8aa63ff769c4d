//! Removing liquidity held by the vault from a Uniswap V2 style pool.

use {
    crate::domain::eth::{Address, B256, Currency, U256},
    number::Ratio,
    std::time::Duration,
};

pub mod amounts;
pub mod candidates;
pub mod flow;

pub use {
    amounts::{Amounts, Withdrawal},
    candidates::Candidate,
    flow::{Readiness, Stage},
};

/// The operator's intent to withdraw a share of the vault's position in the
/// pool of `currency_a` and `currency_b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalRequest {
    pub currency_a: Currency,
    pub currency_b: Currency,
    /// Share of the vault's liquidity tokens to burn.
    pub percentage: Ratio,
    /// Accepted deviation from the expected output amounts.
    pub slippage: Ratio,
    /// Receiver of the withdrawn assets.
    pub recipient: Address,
    /// How long the transaction remains valid after the latest block.
    pub deadline: Duration,
}

/// How the router is allowed to pull the vault's liquidity tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    NotApproved,
    /// An approval transaction was sent but is not mined yet.
    Pending,
    Approved,
    /// An off-chain EIP-2612 signature that substitutes the approval.
    Permit(PermitSignature),
}

impl Authorization {
    /// Whether a withdrawal can be attempted at all.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Approved | Self::Permit(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitSignature {
    pub v: u8,
    pub r: B256,
    pub s: B256,
    pub deadline: U256,
}
