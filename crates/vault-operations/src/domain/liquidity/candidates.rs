//! The router methods a withdrawal may be executed with.
//!
//! Depending on the pair and on how the router was authorized there are one or
//! two methods that could succeed. Which one actually does is only known after
//! simulating them, so all plausible methods are built upfront in the order
//! they should be preferred.

use {
    super::{Amounts, Authorization, PermitSignature},
    crate::domain::eth::{Address, Bytes, Currency, U256},
    alloy::sol_types::SolCall,
    contracts::alloy::AUniswap::AUniswap,
};

/// A fully parameterized call to the vault's Uniswap V2 adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    RemoveLiquidity(AUniswap::removeLiquidityCall),
    RemoveLiquidityEth(AUniswap::removeLiquidityETHCall),
    RemoveLiquidityEthSupportingFeeOnTransferTokens(
        AUniswap::removeLiquidityETHSupportingFeeOnTransferTokensCall,
    ),
    RemoveLiquidityWithPermit(AUniswap::removeLiquidityWithPermitCall),
    RemoveLiquidityEthWithPermit(AUniswap::removeLiquidityETHWithPermitCall),
    RemoveLiquidityEthWithPermitSupportingFeeOnTransferTokens(
        AUniswap::removeLiquidityETHWithPermitSupportingFeeOnTransferTokensCall,
    ),
}

impl Candidate {
    /// The router method name.
    pub fn method(&self) -> &'static str {
        match self {
            Self::RemoveLiquidity(_) => "removeLiquidity",
            Self::RemoveLiquidityEth(_) => "removeLiquidityETH",
            Self::RemoveLiquidityEthSupportingFeeOnTransferTokens(_) => {
                "removeLiquidityETHSupportingFeeOnTransferTokens"
            }
            Self::RemoveLiquidityWithPermit(_) => "removeLiquidityWithPermit",
            Self::RemoveLiquidityEthWithPermit(_) => "removeLiquidityETHWithPermit",
            Self::RemoveLiquidityEthWithPermitSupportingFeeOnTransferTokens(_) => {
                "removeLiquidityETHWithPermitSupportingFeeOnTransferTokens"
            }
        }
    }

    /// ABI encoded adapter call, ready to be forwarded by the vault.
    pub fn calldata(&self) -> Bytes {
        match self {
            Self::RemoveLiquidity(call) => call.abi_encode(),
            Self::RemoveLiquidityEth(call) => call.abi_encode(),
            Self::RemoveLiquidityEthSupportingFeeOnTransferTokens(call) => call.abi_encode(),
            Self::RemoveLiquidityWithPermit(call) => call.abi_encode(),
            Self::RemoveLiquidityEthWithPermit(call) => call.abi_encode(),
            Self::RemoveLiquidityEthWithPermitSupportingFeeOnTransferTokens(call) => {
                call.abi_encode()
            }
        }
        .into()
    }
}

/// The shape of a pair as far as the router is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pair {
    /// Two ERC20 tokens, in request order.
    Tokens { token_a: Address, token_b: Address },
    /// One side is the native asset. The router unwraps that side itself.
    Eth { token: Address, native: Side },
}

/// Which side of the request a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Pair {
    pub fn new(currency_a: Currency, currency_b: Currency, weth: Address) -> Result<Self, Error> {
        if currency_a.wrapped(weth) == currency_b.wrapped(weth) {
            return Err(Error::InvalidPair);
        }
        Ok(match (currency_a, currency_b) {
            (Currency::Native, Currency::Token(token)) => Self::Eth {
                token,
                native: Side::A,
            },
            (Currency::Token(token), Currency::Native) => Self::Eth {
                token,
                native: Side::B,
            },
            (Currency::Token(token_a), Currency::Token(token_b)) => {
                Self::Tokens { token_a, token_b }
            }
            // Equal wrapped addresses were rejected above.
            (Currency::Native, Currency::Native) => return Err(Error::InvalidPair),
        })
    }
}

/// Everything the router methods take apart from the authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub pair: Pair,
    pub liquidity: U256,
    /// Minimum payouts in request order.
    pub minimum: Amounts,
    pub recipient: Address,
    /// Unix timestamp after which the router rejects the call.
    pub deadline: U256,
}

/// Builds the candidates in priority order.
pub fn build(authorization: &Authorization, params: &Params) -> Result<Vec<Candidate>, Error> {
    match authorization {
        Authorization::Approved => Ok(approved(params)),
        Authorization::Permit(signature) => Ok(permitted(params, signature)),
        Authorization::NotApproved | Authorization::Pending => Err(Error::NoAuthorization),
    }
}

/// The token side and native side minimums of an ETH pair.
fn eth_minimums(minimum: &Amounts, native: Side) -> (U256, U256) {
    match native {
        Side::A => (minimum.b, minimum.a),
        Side::B => (minimum.a, minimum.b),
    }
}

fn approved(params: &Params) -> Vec<Candidate> {
    match params.pair {
        Pair::Tokens { token_a, token_b } => {
            vec![Candidate::RemoveLiquidity(AUniswap::removeLiquidityCall {
                tokenA: token_a,
                tokenB: token_b,
                liquidity: params.liquidity,
                amountAMin: params.minimum.a,
                amountBMin: params.minimum.b,
                to: params.recipient,
                deadline: params.deadline,
            })]
        }
        Pair::Eth { token, native } => {
            let (token_min, eth_min) = eth_minimums(&params.minimum, native);
            vec![
                Candidate::RemoveLiquidityEth(AUniswap::removeLiquidityETHCall {
                    token,
                    liquidity: params.liquidity,
                    amountTokenMin: token_min,
                    amountETHMin: eth_min,
                    to: params.recipient,
                    deadline: params.deadline,
                }),
                Candidate::RemoveLiquidityEthSupportingFeeOnTransferTokens(
                    AUniswap::removeLiquidityETHSupportingFeeOnTransferTokensCall {
                        token,
                        liquidity: params.liquidity,
                        amountTokenMin: token_min,
                        amountETHMin: eth_min,
                        to: params.recipient,
                        deadline: params.deadline,
                    },
                ),
            ]
        }
    }
}

// The router checks the permit against the signature's deadline, so that one
// is used for the call as well.
fn permitted(params: &Params, signature: &PermitSignature) -> Vec<Candidate> {
    let PermitSignature { v, r, s, deadline } = *signature;
    match params.pair {
        Pair::Tokens { token_a, token_b } => vec![Candidate::RemoveLiquidityWithPermit(
            AUniswap::removeLiquidityWithPermitCall {
                tokenA: token_a,
                tokenB: token_b,
                liquidity: params.liquidity,
                amountAMin: params.minimum.a,
                amountBMin: params.minimum.b,
                to: params.recipient,
                deadline,
                approveMax: false,
                v,
                r,
                s,
            },
        )],
        Pair::Eth { token, native } => {
            let (token_min, eth_min) = eth_minimums(&params.minimum, native);
            vec![
                Candidate::RemoveLiquidityEthWithPermit(
                    AUniswap::removeLiquidityETHWithPermitCall {
                        token,
                        liquidity: params.liquidity,
                        amountTokenMin: token_min,
                        amountETHMin: eth_min,
                        to: params.recipient,
                        deadline,
                        approveMax: false,
                        v,
                        r,
                        s,
                    },
                ),
                Candidate::RemoveLiquidityEthWithPermitSupportingFeeOnTransferTokens(
                    AUniswap::removeLiquidityETHWithPermitSupportingFeeOnTransferTokensCall {
                        token,
                        liquidity: params.liquidity,
                        amountTokenMin: token_min,
                        amountETHMin: eth_min,
                        to: params.recipient,
                        deadline,
                        approveMax: false,
                        v,
                        r,
                        s,
                    },
                ),
            ]
        }
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("router is neither approved nor authorized by a permit")]
    NoAuthorization,
    #[error("a pair needs two distinct currencies")]
    InvalidPair,
}
