use {
    crate::domain::{
        chain::Pool,
        eth::{Address, U256},
    },
    number::{Ratio, U256Ext},
};

/// A pair of token amounts in the order of the withdrawal request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Amounts {
    pub a: U256,
    pub b: U256,
}

/// The result of burning a share of the vault's liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    /// Liquidity tokens to burn.
    pub liquidity: U256,
    /// Amounts the pool pays out at its current reserves.
    pub expected: Amounts,
    /// Lowest amounts the router may pay out before reverting.
    pub minimum: Amounts,
    /// Highest amounts within the slippage tolerance.
    pub maximum: Amounts,
}

/// Computes the liquidity to burn and the resulting token amounts.
///
/// Burning `liquidity` out of `total_supply` pays out the same share of each
/// reserve, rounded down like the pool contract does.
pub fn withdrawal(
    pool: Option<&Pool>,
    token_a: Address,
    token_b: Address,
    balance: U256,
    percentage: Ratio,
    slippage: Ratio,
) -> Result<Withdrawal, Error> {
    let pool = pool.ok_or(Error::InsufficientLiquidity)?;
    let (reserve_a, reserve_b) = pool
        .reserves(token_a, token_b)
        .ok_or(Error::InvalidPool(pool.address))?;
    if reserve_a.is_zero() || reserve_b.is_zero() || pool.total_supply.is_zero() {
        return Err(Error::InsufficientLiquidity);
    }

    let liquidity = percentage.mul_floor(balance);
    let share = |reserve: U256| {
        liquidity
            .checked_mul_ratio(&reserve, &pool.total_supply)
            .ok_or(Error::Overflow)
    };
    let expected = Amounts {
        a: share(reserve_a)?,
        b: share(reserve_b)?,
    };

    Ok(Withdrawal {
        liquidity,
        expected,
        minimum: Amounts {
            a: minimum(expected.a, slippage),
            b: minimum(expected.b, slippage),
        },
        maximum: Amounts {
            a: maximum(expected.a, slippage).ok_or(Error::Overflow)?,
            b: maximum(expected.b, slippage).ok_or(Error::Overflow)?,
        },
    })
}

/// `floor(amount * (1 - tolerance))`.
pub fn minimum(amount: U256, tolerance: Ratio) -> U256 {
    tolerance.complement().mul_floor(amount)
}

/// `floor(amount * (1 + tolerance))`, `None` on overflow.
pub fn maximum(amount: U256, tolerance: Ratio) -> Option<U256> {
    tolerance.mul_floor_one_plus(amount)
}

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("insufficient liquidity for this trade")]
    InsufficientLiquidity,
    #[error("pool {0} does not hold the requested tokens")]
    InvalidPool(Address),
    #[error("withdrawal amount overflows")]
    Overflow,
}
