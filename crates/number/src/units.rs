use {
    alloy::primitives::{
        U256,
        utils::{ParseUnits, parse_units},
    },
    anyhow::{Context, Result, anyhow},
};

/// Parses a human readable decimal amount (e.g. `"1.5"`) into base units of
/// a token with the given number of decimals.
pub fn parse_amount(value: &str, decimals: u8) -> Result<U256> {
    match parse_units(value.trim(), decimals)
        .with_context(|| format!("could not parse amount {value:?}"))?
    {
        ParseUnits::U256(amount) => Ok(amount),
        ParseUnits::I256(_) => Err(anyhow!("amount {value:?} must not be negative")),
    }
}
