use {
    crate::domain::{
        chain::Chain,
        eth::{self, Address, Bytes, GasMargin, U256},
        submission::Tracker,
    },
    alloy::sol_types::SolCall,
    contracts::alloy::Drago,
    std::sync::Arc,
};

/// The contracts an operation touches on the current chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addresses {
    /// The vault holding the operator's positions.
    pub vault: Address,
    /// Uniswap V2 router. Registered in the vault as the exchange of the
    /// liquidity adapter.
    pub router: Address,
    /// Uniswap V3 swap router. Registered in the vault as the exchange of the
    /// wrapping adapter.
    pub swap_router: Address,
    pub weth: Address,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The operator account signing the transactions.
    pub account: Address,
    pub addresses: Addresses,
    pub gas_margin: GasMargin,
    /// Treat the router as approved without reading the allowance.
    pub assume_approved: bool,
}

/// Operations on a vault. Every on-chain action is forwarded through the
/// vault's `operateOnExchange` entry point.
#[derive(Clone)]
pub struct Vault {
    pub(crate) chain: Arc<dyn Chain>,
    pub(crate) tracker: Arc<dyn Tracker>,
    pub(crate) config: Config,
}

impl Vault {
    pub fn new(chain: Arc<dyn Chain>, tracker: Arc<dyn Tracker>, config: Config) -> Self {
        Self {
            chain,
            tracker,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A transaction asking the vault to forward `calldata` to the adapter
    /// registered for `exchange`.
    pub fn operate_on_exchange(&self, exchange: Address, calldata: Bytes) -> eth::Tx {
        eth::Tx {
            from: self.config.account,
            to: self.config.addresses.vault,
            value: U256::ZERO,
            input: Drago::Drago::operateOnExchangeCall {
                exchange,
                transactions: vec![calldata],
            }
            .abi_encode()
            .into(),
        }
    }
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
