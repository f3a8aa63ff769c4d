//! Integer arithmetic shared by the vault operations crates. Everything here
//! mirrors on-chain semantics: no floating point, truncating division.

pub mod ratio;
pub mod u256_ext;
pub mod units;

pub use {
    ratio::{OutOfRangeError, Ratio},
    u256_ext::U256Ext,
};
