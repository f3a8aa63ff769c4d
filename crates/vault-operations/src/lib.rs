#![forbid(unsafe_code)]

pub mod domain;
pub mod infra;
mod run;

pub use {
    domain::{Vault, eth},
    run::{main, run},
};
