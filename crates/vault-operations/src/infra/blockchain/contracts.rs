use {
    crate::domain::eth::{Address, ChainId},
    contracts::alloy::{IUniswapV2Factory, SwapRouter, UniswapV2Router02, WETH9},
    thiserror::Error,
};

/// Configured contract addresses. Missing addresses fall back to the
/// canonical deployments of the connected chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct Addresses {
    pub router: Option<Address>,
    pub swap_router: Option<Address>,
    pub factory: Option<Address>,
    pub weth: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contracts {
    pub router: Address,
    pub swap_router: Address,
    pub factory: Address,
    pub weth: Address,
}

impl Contracts {
    pub fn new(chain: ChainId, addresses: Addresses) -> Result<Self, Error> {
        let address_for = |contract: &'static str,
                           configured: Option<Address>,
                           deployment: fn(&u64) -> Option<Address>| {
            configured
                .or_else(|| deployment(&chain.0))
                .ok_or(Error::MissingAddress { contract, chain })
        };

        Ok(Self {
            router: address_for(
                "UniswapV2Router02",
                addresses.router,
                UniswapV2Router02::deployment_address,
            )?,
            swap_router: address_for(
                "SwapRouter",
                addresses.swap_router,
                SwapRouter::deployment_address,
            )?,
            factory: address_for(
                "UniswapV2Factory",
                addresses.factory,
                IUniswapV2Factory::deployment_address,
            )?,
            weth: address_for("WETH9", addresses.weth, WETH9::deployment_address)?,
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no address configured for {contract} and no deployment known on chain {chain}")]
    MissingAddress {
        contract: &'static str,
        chain: ChainId,
    },
}
