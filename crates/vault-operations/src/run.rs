use {
    crate::{
        domain::{
            Vault,
            eth::{Currency, U256},
            liquidity::{self, WithdrawalRequest},
            submission,
            vault,
            wrap,
        },
        infra::{
            self,
            blockchain::{Ethereum, Rpc},
            cli,
            config,
            tracker,
        },
    },
    alloy::signers::local::PrivateKeySigner,
    anyhow::{Context, Result},
    clap::Parser,
    std::sync::Arc,
};

pub async fn main() -> Result<()> {
    run(std::env::args()).await
}

/// Parses the arguments and executes the requested operation. A transaction
/// the user refused to sign is not an error.
pub async fn run(args: impl IntoIterator<Item = String>) -> Result<()> {
    let args = cli::Args::parse_from(args);
    let obs_config = observe::Config::new(&args.log, args.stderr_threshold, args.use_json_logs);
    observe::tracing::initialize(&obs_config);
    tracing::info!("running vault operations with validated arguments:\n{args}");

    let signer: PrivateKeySigner = args
        .private_key
        .parse()
        .context("invalid operator private key")?;
    let rpc = Rpc::new(args.node_url.clone(), signer).await?;
    let config = config::file::load(rpc.chain(), &args.config).await;
    let eth = Ethereum::new(rpc, config.contracts)?;
    let vault = new_vault(&eth, &config);

    let result = match args.command {
        cli::Command::RemoveLiquidity(command) => {
            remove_liquidity(&vault, &config, command).await
        }
        cli::Command::Wrap(command) => convert(&vault, Currency::Native, command).await,
        cli::Command::Unwrap(command) => {
            let weth = vault.config().addresses.weth;
            convert(&vault, Currency::Token(weth), command).await
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(err) if rejected_by_user(&err) => {
            tracing::info!("nothing submitted, the transaction was rejected");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn new_vault(eth: &Ethereum, config: &infra::Config) -> Vault {
    let contracts = eth.contracts();
    Vault::new(
        Arc::new(eth.clone()),
        Arc::new(tracker::InMemory::default()),
        vault::Config {
            account: eth.account(),
            addresses: vault::Addresses {
                vault: config.vault,
                router: contracts.router,
                swap_router: contracts.swap_router,
                weth: contracts.weth,
            },
            gas_margin: config.gas_margin,
            assume_approved: config.assume_approved,
        },
    )
}

async fn remove_liquidity(
    vault: &Vault,
    config: &infra::Config,
    command: cli::RemoveLiquidity,
) -> Result<()> {
    let request = WithdrawalRequest {
        currency_a: command.currency_a,
        currency_b: command.currency_b,
        percentage: command.percentage,
        slippage: command.slippage.unwrap_or(config.default_slippage),
        recipient: command.recipient.unwrap_or(vault.config().account),
        deadline: command
            .deadline
            .map(Into::into)
            .unwrap_or(config.transaction_deadline),
    };
    let permit = command.permit.signature();

    if command.dry_run {
        let (authorization, readiness) = vault.preview(&request, permit).await?;
        match readiness.blocking_reason() {
            None => tracing::info!(?authorization, "withdrawal can be submitted"),
            Some(reason) => tracing::info!(%reason, ?authorization, "withdrawal blocked"),
        }
        return Ok(());
    }

    let authorization = vault.authorization(&request, permit).await?;
    let id = vault.remove_liquidity(&request, &authorization).await?;
    tracing::info!(%id, "liquidity removal submitted");
    Ok(())
}

/// Wraps or unwraps depending on `input`.
async fn convert(vault: &Vault, input: Currency, command: cli::Amount) -> Result<()> {
    let amount: U256 = number::units::parse_amount(&command.amount, 18)?;
    let weth = vault.config().addresses.weth;
    let output = match input {
        Currency::Native => Currency::Token(weth),
        Currency::Token(_) => Currency::Native,
    };
    let id = vault.wrap(input, output, amount).await?;
    tracing::info!(%id, "wrap submitted");
    Ok(())
}

fn rejected_by_user(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<liquidity::flow::Error>(),
        Some(liquidity::flow::Error::Submission(submission::Error::RejectedByUser))
    ) || matches!(
        err.downcast_ref::<wrap::Error>(),
        Some(wrap::Error::Submission(submission::Error::RejectedByUser))
    )
}
