use {
    crate::domain::{
        chain::{self, Chain, Pool, SendError},
        eth::{self, Address, U256},
    },
    alloy::{
        eips::BlockNumberOrTag,
        network::{EthereumWallet, TransactionBuilder},
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::types::TransactionRequest,
        signers::local::PrivateKeySigner,
        transports::{RpcError, TransportError},
    },
    anyhow::Context,
    ::contracts::alloy::{ERC20, IUniswapV2Factory, IUniswapV2Pair},
    std::fmt,
    url::Url,
};

pub mod contracts;

pub use self::contracts::Contracts;

/// Wallets answer with this JSON-RPC error code when the user declines to
/// sign (EIP-1193).
const USER_REJECTED_REQUEST: i64 = 4001;

/// An Ethereum RPC connection with the operator's signer attached.
pub struct Rpc {
    provider: DynProvider,
    chain: eth::ChainId,
    account: Address,
}

impl Rpc {
    /// Instantiate an RPC client to an Ethereum (or Ethereum-compatible) node
    /// at the specified URL.
    pub async fn new(url: Url, signer: PrivateKeySigner) -> Result<Self, Error> {
        let account = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();
        let chain = eth::ChainId(provider.get_chain_id().await?);

        Ok(Self {
            provider,
            chain,
            account,
        })
    }

    /// The chain the node is connected to.
    pub fn chain(&self) -> eth::ChainId {
        self.chain
    }
}

/// The Ethereum blockchain, accessed through a JSON-RPC node. Transactions
/// are signed locally by the operator's key.
#[derive(Clone)]
pub struct Ethereum {
    provider: DynProvider,
    chain: eth::ChainId,
    account: Address,
    contracts: Contracts,
}

impl Ethereum {
    /// Resolves the contracts for the connected chain.
    pub fn new(rpc: Rpc, addresses: contracts::Addresses) -> Result<Self, Error> {
        let Rpc {
            provider,
            chain,
            account,
        } = rpc;
        let contracts = Contracts::new(chain, addresses)?;

        Ok(Self {
            provider,
            chain,
            account,
            contracts,
        })
    }

    /// The account signing transactions.
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn contracts(&self) -> &Contracts {
        &self.contracts
    }

    fn request(tx: eth::Tx) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(tx.from)
            .with_to(tx.to)
            .with_value(tx.value)
            .with_input(tx.input)
    }
}

#[async_trait::async_trait]
impl Chain for Ethereum {
    fn chain_id(&self) -> eth::ChainId {
        self.chain
    }

    async fn latest_timestamp(&self) -> Result<u64, chain::Error> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .context("failed to fetch latest block")?
            .context("node returned no latest block")?;
        Ok(block.header.timestamp)
    }

    async fn pool(&self, token_a: Address, token_b: Address) -> Result<Option<Pool>, chain::Error> {
        let factory =
            IUniswapV2Factory::Instance::new(self.contracts.factory, self.provider.clone());
        let address = factory
            .getPair(token_a, token_b)
            .call()
            .await
            .context("failed to look up pair")?;
        if address.is_zero() {
            return Ok(None);
        }

        let pair = IUniswapV2Pair::Instance::new(address, self.provider.clone());
        let (token0, token1, total_supply, reserves) = futures::try_join!(
            async { pair.token0().call().await },
            async { pair.token1().call().await },
            async { pair.totalSupply().call().await },
            async { pair.getReserves().call().await },
        )
        .with_context(|| format!("failed to read pool {address}"))?;

        Ok(Some(Pool {
            address,
            token0,
            token1,
            reserve0: U256::from(reserves.reserve0),
            reserve1: U256::from(reserves.reserve1),
            total_supply,
        }))
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, chain::Error> {
        Ok(ERC20::Instance::new(token, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .with_context(|| format!("failed to read balance of {owner} in {token}"))?)
    }

    async fn native_balance(&self, owner: Address) -> Result<U256, chain::Error> {
        Ok(self
            .provider
            .get_balance(owner)
            .await
            .with_context(|| format!("failed to read native balance of {owner}"))?)
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, chain::Error> {
        Ok(ERC20::Instance::new(token, self.provider.clone())
            .allowance(owner, spender)
            .call()
            .await
            .with_context(|| format!("failed to read allowance of {spender} on {token}"))?)
    }

    async fn estimate_gas(&self, tx: &eth::Tx) -> Result<eth::Gas, chain::Error> {
        let gas = self
            .provider
            .estimate_gas(Self::request(tx.clone()))
            .await
            .context("gas estimation failed")?;
        Ok(gas.into())
    }

    async fn send(&self, tx: eth::Tx, gas_limit: Option<eth::Gas>) -> Result<eth::TxId, SendError> {
        let mut request = Self::request(tx);
        if let Some(gas_limit) = gas_limit {
            let gas_limit = u64::try_from(gas_limit).map_err(|err| SendError::Failed(err.into()))?;
            request = request.with_gas_limit(gas_limit);
        }
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(classify)?;
        Ok(eth::TxId(*pending.tx_hash()))
    }
}

fn classify(err: TransportError) -> SendError {
    let rejected = matches!(
        &err,
        RpcError::ErrorResp(payload) if payload.code == USER_REJECTED_REQUEST
    );
    if rejected {
        SendError::Rejected
    } else {
        SendError::Failed(err.into())
    }
}

impl fmt::Debug for Ethereum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ethereum")
            .field("chain", &self.chain)
            .field("account", &self.account)
            .field("contracts", &self.contracts)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rpc error: {0:?}")]
    Rpc(#[from] TransportError),
    #[error(transparent)]
    Contracts(#[from] contracts::Error),
}
