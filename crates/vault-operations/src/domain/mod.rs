pub mod chain;
pub mod estimation;
pub mod eth;
pub mod liquidity;
pub mod submission;
pub mod vault;
pub mod wrap;

pub use {
    chain::Chain,
    submission::{Record, Tracker, TransactionInfo},
    vault::Vault,
};
