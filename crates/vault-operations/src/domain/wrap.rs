//! Converting between the native asset and its wrapped token inside the vault.

use {
    crate::{
        domain::{
            Vault,
            chain,
            eth::{self, Address, Currency, U256},
            submission::{self, TransactionInfo},
        },
        infra::observe,
    },
    alloy::sol_types::SolCall,
    contracts::alloy::{AUniswapV3::AUniswapV3, AWeth::AWeth},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapType {
    NotApplicable,
    Wrap,
    Unwrap,
}

impl WrapType {
    /// Wrapping applies exactly when one side is the native asset and the
    /// other its wrapped token.
    pub fn new(input: Currency, output: Currency, weth: Address) -> Self {
        match (input, output) {
            (Currency::Native, Currency::Token(token)) if token == weth => Self::Wrap,
            (Currency::Token(token), Currency::Native) if token == weth => Self::Unwrap,
            _ => Self::NotApplicable,
        }
    }
}

/// Problems with the operator's input, worded for the operator.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Enter ETH amount")]
    EnterEthAmount,
    #[error("Enter WETH amount")]
    EnterWethAmount,
    #[error("Insufficient ETH balance")]
    InsufficientEthBalance,
    #[error("Insufficient WETH balance")]
    InsufficientWethBalance,
}

/// Checks `amount` against the vault's balance of the input currency.
pub fn validate(kind: WrapType, amount: U256, balance: U256) -> Result<(), InputError> {
    let (empty, insufficient) = match kind {
        WrapType::Wrap => (InputError::EnterEthAmount, InputError::InsufficientEthBalance),
        WrapType::Unwrap => (
            InputError::EnterWethAmount,
            InputError::InsufficientWethBalance,
        ),
        WrapType::NotApplicable => return Ok(()),
    };
    if amount.is_zero() {
        Err(empty)
    } else if amount > balance {
        Err(insufficient)
    } else {
        Ok(())
    }
}

impl Vault {
    /// Wraps or unwraps `amount` of the vault's native asset, depending on
    /// the direction from `input` to `output`.
    pub async fn wrap(
        &self,
        input: Currency,
        output: Currency,
        amount: U256,
    ) -> Result<eth::TxId, Error> {
        let addresses = self.config.addresses;
        let kind = WrapType::new(input, output, addresses.weth);
        let (balance, tx) = match kind {
            WrapType::Wrap => (
                self.chain.native_balance(addresses.vault).await?,
                self.operate_on_exchange(
                    addresses.swap_router,
                    AUniswapV3::wrapETHCall { value: amount }
                        .abi_encode()
                        .into(),
                ),
            ),
            WrapType::Unwrap => (
                self.chain
                    .token_balance(addresses.weth, addresses.vault)
                    .await?,
                self.operate_on_exchange(
                    addresses.weth,
                    AWeth::unwrapEthCall {
                        wrappedEtherAddress: addresses.weth,
                        amount,
                    }
                    .abi_encode()
                    .into(),
                ),
            ),
            WrapType::NotApplicable => return Err(Error::NotApplicable),
        };
        validate(kind, amount, balance)?;
        observe::wrapping(kind, amount);

        let info = TransactionInfo::Wrap {
            unwrapped: kind == WrapType::Unwrap,
            amount,
        };
        Ok(submission::submit(
            self.chain.as_ref(),
            self.tracker.as_ref(),
            tx,
            None,
            info,
        )
        .await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("currencies are not the native asset and its wrapped token")]
    NotApplicable,
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Submission(#[from] submission::Error),
    #[error(transparent)]
    Chain(#[from] chain::Error),
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::{
            chain::MockChain,
            eth::{B256, GasMargin},
            submission::{MockTracker, Record},
            vault::{Addresses, Config},
        },
        alloy::primitives::address,
        contracts::alloy::Drago::Drago,
        mockall::predicate::eq,
        rstest::rstest,
        std::sync::Arc,
    };

    const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
    const VAULT: Address = address!("0x00000000000000000000000000000000000000aa");
    const SWAP_ROUTER: Address = address!("0xE592427A0AEce92De3Edee1F18E0157C05861564");

    fn vault(chain: MockChain, tracker: MockTracker) -> Vault {
        Vault::new(
            Arc::new(chain),
            Arc::new(tracker),
            Config {
                account: Address::repeat_byte(0x11),
                addresses: Addresses {
                    vault: VAULT,
                    router: Address::repeat_byte(0x22),
                    swap_router: SWAP_ROUTER,
                    weth: WETH,
                },
                gas_margin: GasMargin::default(),
                assume_approved: false,
            },
        )
    }

    #[test]
    fn derives_wrap_type() {
        let dai = Currency::Token(Address::repeat_byte(0xda));
        let weth = Currency::Token(WETH);
        assert_eq!(WrapType::new(Currency::Native, weth, WETH), WrapType::Wrap);
        assert_eq!(WrapType::new(weth, Currency::Native, WETH), WrapType::Unwrap);
        assert_eq!(
            WrapType::new(Currency::Native, dai, WETH),
            WrapType::NotApplicable
        );
        assert_eq!(WrapType::new(weth, weth, WETH), WrapType::NotApplicable);
    }

    #[rstest]
    #[case(WrapType::Wrap, 0, 10, Err(InputError::EnterEthAmount))]
    #[case(WrapType::Wrap, 11, 10, Err(InputError::InsufficientEthBalance))]
    #[case(WrapType::Wrap, 10, 10, Ok(()))]
    #[case(WrapType::Unwrap, 0, 10, Err(InputError::EnterWethAmount))]
    #[case(WrapType::Unwrap, 11, 10, Err(InputError::InsufficientWethBalance))]
    #[case(WrapType::NotApplicable, 11, 10, Ok(()))]
    fn validates_input(
        #[case] kind: WrapType,
        #[case] amount: u64,
        #[case] balance: u64,
        #[case] expected: Result<(), InputError>,
    ) {
        assert_eq!(
            validate(kind, U256::from(amount), U256::from(balance)),
            expected
        );
    }

    #[tokio::test]
    async fn wraps_through_swap_router_adapter() {
        let id = eth::TxId(B256::repeat_byte(1));
        let mut chain = MockChain::new();
        chain
            .expect_native_balance()
            .with(eq(VAULT))
            .returning(|_| Ok(U256::from(1_000)));
        chain
            .expect_send()
            .times(1)
            .withf(|tx, gas_limit| {
                let call = Drago::operateOnExchangeCall::abi_decode(&tx.input).unwrap();
                tx.to == VAULT
                    && gas_limit.is_none()
                    && call.exchange == SWAP_ROUTER
                    && call.transactions[0][..]
                        == AUniswapV3::wrapETHCall {
                            value: U256::from(400),
                        }
                        .abi_encode()[..]
            })
            .returning(move |_, _| Ok(id));
        let mut tracker = MockTracker::new();
        tracker
            .expect_add()
            .with(eq(Record {
                id,
                info: TransactionInfo::Wrap {
                    unwrapped: false,
                    amount: U256::from(400),
                },
            }))
            .times(1)
            .return_const(());

        let result = vault(chain, tracker)
            .wrap(Currency::Native, Currency::Token(WETH), U256::from(400))
            .await
            .unwrap();
        assert_eq!(result, id);
    }

    #[tokio::test]
    async fn unwraps_through_weth_adapter() {
        let id = eth::TxId(B256::repeat_byte(2));
        let mut chain = MockChain::new();
        chain
            .expect_token_balance()
            .with(eq(WETH), eq(VAULT))
            .returning(|_, _| Ok(U256::from(1_000)));
        chain
            .expect_send()
            .times(1)
            .withf(|tx, _| {
                let call = Drago::operateOnExchangeCall::abi_decode(&tx.input).unwrap();
                call.exchange == WETH
                    && call.transactions[0][..]
                        == AWeth::unwrapEthCall {
                            wrappedEtherAddress: WETH,
                            amount: U256::from(1_000),
                        }
                        .abi_encode()[..]
            })
            .returning(move |_, _| Ok(id));
        let mut tracker = MockTracker::new();
        tracker.expect_add().times(1).return_const(());

        vault(chain, tracker)
            .wrap(Currency::Token(WETH), Currency::Native, U256::from(1_000))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejects_insufficient_balance() {
        let mut chain = MockChain::new();
        chain
            .expect_native_balance()
            .returning(|_| Ok(U256::from(5)));
        chain.expect_send().never();

        let result = vault(chain, MockTracker::new())
            .wrap(Currency::Native, Currency::Token(WETH), U256::from(6))
            .await;
        assert!(matches!(
            result,
            Err(Error::Input(InputError::InsufficientEthBalance))
        ));
    }
}
