use {
    crate::domain::{
        eth::{Address, B256, Currency, U256},
        liquidity::PermitSignature,
    },
    number::Ratio,
    std::{fmt, path::PathBuf},
    url::Url,
};

#[derive(Debug, clap::Parser)]
#[clap(version, about = "Operate a vault's positions through its exchange adapters")]
pub struct Args {
    /// The log filter.
    #[clap(long, env, default_value = "warn,vault_operations=debug")]
    pub log: String,

    /// At which log level logs should be printed to stderr instead of stdout.
    #[clap(long, env)]
    pub stderr_threshold: Option<tracing::Level>,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// The node RPC API endpoint.
    #[clap(long, env)]
    pub node_url: Url,

    /// The operator's private key used to sign transactions. Expects a
    /// 32-byte hex encoded string.
    #[clap(long, env, hide_env_values = true)]
    pub private_key: String,

    /// Path to the configuration file. This file should be in TOML format.
    /// For an example see `crates/vault-operations/example.toml`.
    #[clap(long, env)]
    pub config: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Withdraw a share of the vault's liquidity from a Uniswap V2 pool.
    RemoveLiquidity(RemoveLiquidity),
    /// Wrap native currency held by the vault.
    Wrap(Amount),
    /// Unwrap WETH held by the vault.
    Unwrap(Amount),
}

#[derive(Debug, clap::Args)]
pub struct RemoveLiquidity {
    /// First currency of the pair, "ETH" or a token address.
    #[clap(long)]
    pub currency_a: Currency,

    /// Second currency of the pair, "ETH" or a token address.
    #[clap(long)]
    pub currency_b: Currency,

    /// Share of the vault's liquidity to withdraw, e.g. "50%" or "1/4".
    #[clap(long)]
    pub percentage: Ratio,

    /// Accepted slippage, e.g. "0.5%". Defaults to the configured slippage.
    #[clap(long)]
    pub slippage: Option<Ratio>,

    /// Receiver of the withdrawn currencies. Defaults to the operator.
    #[clap(long)]
    pub recipient: Option<Address>,

    /// How long the transaction remains valid, e.g. "20m". Defaults to the
    /// configured deadline.
    #[clap(long)]
    pub deadline: Option<humantime::Duration>,

    #[clap(flatten)]
    pub permit: Permit,

    /// Only report whether the withdrawal could be submitted.
    #[clap(long)]
    pub dry_run: bool,
}

/// An EIP-2612 signature over the liquidity token authorizing the router.
/// Either all components are given or none.
#[derive(Debug, clap::Args)]
pub struct Permit {
    #[clap(long, requires = "permit_r")]
    pub permit_v: Option<u8>,

    #[clap(long, requires = "permit_s")]
    pub permit_r: Option<B256>,

    #[clap(long, requires = "permit_deadline")]
    pub permit_s: Option<B256>,

    /// Deadline of the signature as a unix timestamp.
    #[clap(long, requires = "permit_v")]
    pub permit_deadline: Option<U256>,
}

impl Permit {
    pub fn signature(&self) -> Option<PermitSignature> {
        Some(PermitSignature {
            v: self.permit_v?,
            r: self.permit_r?,
            s: self.permit_s?,
            deadline: self.permit_deadline?,
        })
    }
}

#[derive(Debug, clap::Args)]
pub struct Amount {
    /// Amount in ether units, e.g. "1.5".
    #[clap(long)]
    pub amount: String,
}

/// Arg types have custom `Display` impls instead of relying on `Debug` to avoid
/// accidentally printing secrets. Secret values are printed as "SECRET".
impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            log,
            stderr_threshold,
            use_json_logs,
            node_url,
            private_key: _,
            config,
            command,
        } = self;

        writeln!(f, "log: {log}")?;
        writeln!(f, "stderr_threshold: {stderr_threshold:?}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "private_key: SECRET")?;
        writeln!(f, "config: {config:?}")?;
        writeln!(f, "command: {command:?}")?;
        Ok(())
    }
}
