use {
    alloy::{
        primitives::{Address, B256, U256, address},
        sol_types::SolCall,
    },
    contracts::alloy::{AUniswap::AUniswap, Drago::Drago},
    number::Ratio,
    std::{
        sync::{Arc, Mutex},
        time::Duration,
    },
    vault_operations::{
        Vault,
        domain::{
            Chain,
            Tracker,
            TransactionInfo,
            chain::{self, Pool, SendError},
            eth::{self, Currency, GasMargin},
            liquidity::{self, Authorization, WithdrawalRequest, flow},
            vault::{Addresses, Config},
        },
        infra::tracker::InMemory,
    },
};

const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
const USDC: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
const PAIR: Address = address!("0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc");
const VAULT: Address = address!("0x00000000000000000000000000000000000000aa");
const ROUTER: Address = address!("0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D");
const OPERATOR: Address = address!("0x00000000000000000000000000000000000000bb");

/// A chain with a single USDC/WETH pool where the standard ETH removal
/// reverts, like it does for tokens taking a fee on transfer.
#[derive(Default)]
struct FeeOnTransferChain {
    sent: Mutex<Vec<(eth::Tx, Option<eth::Gas>)>>,
    reject: bool,
}

impl FeeOnTransferChain {
    fn method(tx: &eth::Tx) -> [u8; 4] {
        let call = Drago::operateOnExchangeCall::abi_decode(&tx.input).unwrap();
        assert_eq!(call.exchange, ROUTER);
        call.transactions[0][..4].try_into().unwrap()
    }
}

#[async_trait::async_trait]
impl Chain for FeeOnTransferChain {
    fn chain_id(&self) -> eth::ChainId {
        eth::ChainId(1)
    }

    async fn latest_timestamp(&self) -> Result<u64, chain::Error> {
        Ok(1_700_000_000)
    }

    async fn pool(&self, token_a: Address, token_b: Address) -> Result<Option<Pool>, chain::Error> {
        let tokens = [token_a, token_b];
        if !(tokens.contains(&WETH) && tokens.contains(&USDC)) {
            return Ok(None);
        }
        Ok(Some(Pool {
            address: PAIR,
            token0: USDC,
            token1: WETH,
            reserve0: U256::from(30_000_000_000u64),
            reserve1: U256::from(10u64).pow(U256::from(19)),
            total_supply: U256::from(10u64).pow(U256::from(12)),
        }))
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, chain::Error> {
        assert_eq!((token, owner), (PAIR, VAULT));
        Ok(U256::from(10u64).pow(U256::from(10)))
    }

    async fn native_balance(&self, _: Address) -> Result<U256, chain::Error> {
        Ok(U256::ZERO)
    }

    async fn allowance(&self, _: Address, _: Address, _: Address) -> Result<U256, chain::Error> {
        Ok(U256::MAX)
    }

    async fn estimate_gas(&self, tx: &eth::Tx) -> Result<eth::Gas, chain::Error> {
        if Self::method(tx) == AUniswap::removeLiquidityETHCall::SELECTOR {
            let err = anyhow::anyhow!("execution reverted: TransferHelper: ETH_TRANSFER_FAILED");
            return Err(err.into());
        }
        Ok(eth::Gas::from(180_000u64))
    }

    async fn send(&self, tx: eth::Tx, gas_limit: Option<eth::Gas>) -> Result<eth::TxId, SendError> {
        if self.reject {
            return Err(SendError::Rejected);
        }
        self.sent.lock().unwrap().push((tx, gas_limit));
        Ok(eth::TxId(B256::repeat_byte(0x42)))
    }
}

fn vault(chain: Arc<FeeOnTransferChain>, tracker: Arc<InMemory>) -> Vault {
    Vault::new(
        chain,
        tracker,
        Config {
            account: OPERATOR,
            addresses: Addresses {
                vault: VAULT,
                router: ROUTER,
                swap_router: Address::repeat_byte(0x33),
                weth: WETH,
            },
            gas_margin: GasMargin::default(),
            assume_approved: false,
        },
    )
}

fn request() -> WithdrawalRequest {
    WithdrawalRequest {
        currency_a: Currency::Token(USDC),
        currency_b: Currency::Native,
        percentage: Ratio::from_percent(100).unwrap(),
        slippage: "0.5%".parse().unwrap(),
        recipient: OPERATOR,
        deadline: Duration::from_secs(20 * 60),
    }
}

#[tokio::test]
async fn falls_back_to_fee_on_transfer_method() {
    observe::tracing::initialize_reentrant("vault_operations=debug");

    let chain = Arc::new(FeeOnTransferChain::default());
    let tracker = Arc::new(InMemory::default());
    let vault = vault(chain.clone(), tracker.clone());

    let authorization = vault.authorization(&request(), None).await.unwrap();
    assert_eq!(authorization, Authorization::Approved);
    let readiness = vault.readiness(&request(), &authorization).await.unwrap();
    assert!(readiness.can_submit());

    let id = vault
        .remove_liquidity(&request(), &authorization)
        .await
        .unwrap();
    assert_eq!(id, eth::TxId(B256::repeat_byte(0x42)));

    let sent = chain.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    let (tx, gas_limit) = &sent[0];
    assert_eq!(tx.from, OPERATOR);
    assert_eq!(tx.to, VAULT);
    assert_eq!(*gas_limit, Some(eth::Gas::from(216_000u64)));

    let outer = Drago::operateOnExchangeCall::abi_decode(&tx.input).unwrap();
    let call = AUniswap::removeLiquidityETHSupportingFeeOnTransferTokensCall::abi_decode(
        &outer.transactions[0],
    )
    .unwrap();
    // 1% of the pool: 300_000_000 USDC units and 0.1 ETH, minus 0.5%.
    assert_eq!(call.token, USDC);
    assert_eq!(call.liquidity, U256::from(10u64).pow(U256::from(10)));
    assert_eq!(call.amountTokenMin, U256::from(298_500_000u64));
    assert_eq!(call.amountETHMin, U256::from(99_500_000_000_000_000u64));
    assert_eq!(call.deadline, U256::from(1_700_001_200u64));

    assert_eq!(
        tracker.all().into_iter().map(|record| record.info).collect::<Vec<_>>(),
        [TransactionInfo::RemoveLiquidity {
            base_currency_id: USDC.to_checksum(None),
            quote_currency_id: WETH.to_checksum(None),
            expected_amount_base: U256::from(300_000_000u64),
            expected_amount_quote: U256::from(100_000_000_000_000_000u64),
        }]
    );
}

#[tokio::test]
async fn user_rejection_records_nothing() {
    let chain = Arc::new(FeeOnTransferChain {
        reject: true,
        ..Default::default()
    });
    let tracker = Arc::new(InMemory::default());
    let vault = vault(chain, tracker.clone());

    let result = vault
        .remove_liquidity(&request(), &Authorization::Approved)
        .await;
    assert!(matches!(
        result,
        Err(flow::Error::Submission(
            vault_operations::domain::submission::Error::RejectedByUser
        ))
    ));
    assert!(tracker.all().is_empty());
}

#[tokio::test]
async fn unknown_pool_blocks_submission() {
    let vault = vault(
        Arc::new(FeeOnTransferChain::default()),
        Arc::new(InMemory::default()),
    );
    let request = WithdrawalRequest {
        currency_a: Currency::Token(Address::repeat_byte(0x99)),
        ..request()
    };

    let readiness = vault
        .readiness(&request, &Authorization::Approved)
        .await
        .unwrap();
    assert_eq!(
        readiness.blocking_reason(),
        Some(liquidity::flow::Blocker::InsufficientLiquidity)
    );
    let (authorization, readiness) = vault.preview(&request, None).await.unwrap();
    assert_eq!(authorization, Authorization::NotApproved);
    assert_eq!(
        readiness.blocking_reason(),
        Some(liquidity::flow::Blocker::InsufficientLiquidity)
    );

    let result = vault
        .remove_liquidity(&request, &Authorization::Approved)
        .await;
    assert!(matches!(
        result,
        Err(flow::Error::Amounts(
            liquidity::amounts::Error::InsufficientLiquidity
        ))
    ));
}
