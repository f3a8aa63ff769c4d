//! The boundary between the domain logic and the blockchain.
//!
//! Everything the flows need from the node (pool state, balances, gas
//! simulation and transaction submission) goes through [`Chain`], which lets
//! the flows be tested against mocks.

use crate::domain::eth::{self, Address, U256};

/// A Uniswap V2 style constant product pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pool {
    /// The pool's own address, which is also its liquidity token.
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub reserve0: U256,
    pub reserve1: U256,
    /// Total supply of the liquidity token.
    pub total_supply: U256,
}

impl Pool {
    /// Reserves ordered as `(token_a, token_b)`. `None` if the tokens are not
    /// the pool's tokens.
    pub fn reserves(&self, token_a: Address, token_b: Address) -> Option<(U256, U256)> {
        if (token_a, token_b) == (self.token0, self.token1) {
            Some((self.reserve0, self.reserve1))
        } else if (token_a, token_b) == (self.token1, self.token0) {
            Some((self.reserve1, self.reserve0))
        } else {
            None
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    fn chain_id(&self) -> eth::ChainId;

    /// Timestamp of the latest block, in seconds.
    async fn latest_timestamp(&self) -> Result<u64, Error>;

    /// The pool for the token pair, `None` if it was never created.
    async fn pool(&self, token_a: Address, token_b: Address) -> Result<Option<Pool>, Error>;

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, Error>;

    async fn native_balance(&self, owner: Address) -> Result<U256, Error>;

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, Error>;

    /// Simulates the transaction and returns the gas it consumes. Fails if
    /// the transaction reverts.
    async fn estimate_gas(&self, tx: &eth::Tx) -> Result<eth::Gas, Error>;

    /// Signs and broadcasts the transaction. Without a gas limit the node's
    /// estimate is used.
    async fn send(&self, tx: eth::Tx, gas_limit: Option<eth::Gas>) -> Result<eth::TxId, SendError>;
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] pub anyhow::Error);

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The signer refused to sign. Not a failure of the transaction itself.
    #[error("transaction rejected by the user")]
    Rejected,
    #[error("transaction submission failed: {0:#}")]
    Failed(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_reserves() {
        let (a, b) = (Address::repeat_byte(1), Address::repeat_byte(2));
        let pool = Pool {
            address: Address::repeat_byte(3),
            token0: a,
            token1: b,
            reserve0: U256::from(10),
            reserve1: U256::from(20),
            total_supply: U256::from(100),
        };
        assert_eq!(pool.reserves(a, b), Some((U256::from(10), U256::from(20))));
        assert_eq!(pool.reserves(b, a), Some((U256::from(20), U256::from(10))));
        assert_eq!(pool.reserves(a, Address::repeat_byte(4)), None);
    }
}
