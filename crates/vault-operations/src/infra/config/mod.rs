use {
    crate::{
        domain::eth::{Address, GasMargin},
        infra::blockchain,
    },
    number::Ratio,
    std::time::Duration,
};

pub mod file;

/// Configuration resolved for the connected chain.
#[derive(Debug, Clone)]
pub struct Config {
    pub vault: Address,
    pub contracts: blockchain::contracts::Addresses,
    pub gas_margin: GasMargin,
    /// How long a transaction stays valid after the latest block.
    pub transaction_deadline: Duration,
    /// Slippage tolerance used when the operator does not specify one.
    pub default_slippage: Ratio,
    pub assume_approved: bool,
}
