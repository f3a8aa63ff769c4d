//! Contract bindings for the vault, its exchange adapters and the external
//! exchange contracts the adapters forward to.
pub mod alloy;
