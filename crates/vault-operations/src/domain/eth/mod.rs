use {
    derive_more::{Display, From, Into},
    std::{fmt, str::FromStr},
};

mod gas;

pub use {
    alloy::primitives::{Address, B256, Bytes, U256},
    gas::{Gas, GasMargin, GasOverflow},
};

/// Chain ID as defined by EIP-155.
///
/// https://eips.ethereum.org/EIPS/eip-155
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct ChainId(pub u64);

/// The hash of a submitted transaction.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct TxId(pub B256);

/// An Ethereum transaction as handed to the node for simulation and
/// submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
}

/// A currency as selected by the operator: either the chain's native asset
/// or an ERC20 token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Native,
    Token(Address),
}

impl Currency {
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The ERC20 address representing this currency on-chain. The native
    /// asset is represented by its wrapped token.
    pub fn wrapped(&self, weth: Address) -> Address {
        match self {
            Self::Native => weth,
            Self::Token(address) => *address,
        }
    }

    /// Identifier used when recording transactions. Native currencies are
    /// identified by their wrapped token address so that records of the two
    /// flavours can be compared.
    pub fn id(&self, weth: Address) -> String {
        self.wrapped(weth).to_checksum(None)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("ETH"),
            Self::Token(address) => write!(f, "{address}"),
        }
    }
}

impl FromStr for Currency {
    type Err = InvalidCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("eth") {
            return Ok(Self::Native);
        }
        s.parse()
            .map(Self::Token)
            .map_err(|_| InvalidCurrency(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid currency {0:?}, expected \"ETH\" or a token address")]
pub struct InvalidCurrency(pub String);
