pub use load::load;
use {
    alloy::primitives::Address,
    serde::Deserialize,
    std::time::Duration,
};

mod load;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    /// Optionally specify the chain ID the vault lives on. The actual chain
    /// ID is fetched from the node and loading fails if the two differ.
    chain_id: Option<u64>,

    /// The vault all operations are routed through.
    vault: Address,

    /// Override contract addresses.
    #[serde(default)]
    contracts: ContractsConfig,

    /// Margin added to simulated gas amounts, in basis points.
    #[serde(default = "default_gas_margin_bps")]
    gas_margin_bps: u32,

    /// Chain specific gas margins taking precedence over `gas-margin-bps`.
    #[serde(default, rename = "gas-margin-override")]
    gas_margin_overrides: Vec<GasMarginOverride>,

    /// How long transactions remain valid after the latest block.
    #[serde(with = "humantime_serde", default = "default_transaction_deadline")]
    transaction_deadline: Duration,

    /// Slippage tolerance for withdrawals, in basis points.
    #[serde(default = "default_slippage_bps")]
    default_slippage_bps: u32,

    /// Treat the router as approved to spend the vault's liquidity tokens
    /// without reading the allowance.
    #[serde(default)]
    assume_approved: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ContractsConfig {
    /// Uniswap V2 router registered as an exchange in the vault.
    router: Option<Address>,

    /// Uniswap V3 swap router registered as an exchange in the vault.
    swap_router: Option<Address>,

    /// Uniswap V2 factory used to look up pools.
    factory: Option<Address>,

    weth: Option<Address>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct GasMarginOverride {
    chain_id: u64,
    bps: u32,
}

fn default_gas_margin_bps() -> u32 {
    2_000
}

fn default_transaction_deadline() -> Duration {
    Duration::from_secs(30 * 60)
}

fn default_slippage_bps() -> u32 {
    500
}
