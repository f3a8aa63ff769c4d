pub mod blockchain;
pub mod cli;
pub mod config;
pub mod observe;
pub mod tracker;

pub use {blockchain::Ethereum, config::Config};
