use {
    crate::{
        domain::eth::{self, GasMargin},
        infra::{self, blockchain, config::file},
    },
    number::Ratio,
    std::path::Path,
    tokio::fs,
};

/// Load the configuration from a TOML file for the chain the node is
/// connected to.
///
/// # Panics
///
/// This method panics if the config is invalid or on I/O errors.
pub async fn load(chain: eth::ChainId, path: &Path) -> infra::Config {
    let data = fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("I/O error while reading {path:?}: {e:?}"));
    let config: file::Config = toml::de::from_str(&data)
        .unwrap_or_else(|e| panic!("TOML syntax error while reading {path:?}: {e}"));

    assert_eq!(
        config.chain_id.map(eth::ChainId).unwrap_or(chain),
        chain,
        "The configured chain ID does not match connected Ethereum node"
    );

    let gas_margin_bps = config
        .gas_margin_overrides
        .iter()
        .find(|o| o.chain_id == chain.0)
        .map(|o| o.bps)
        .unwrap_or(config.gas_margin_bps);

    infra::Config {
        vault: config.vault,
        contracts: blockchain::contracts::Addresses {
            router: config.contracts.router,
            swap_router: config.contracts.swap_router,
            factory: config.contracts.factory,
            weth: config.contracts.weth,
        },
        gas_margin: GasMargin::from_bps(gas_margin_bps),
        transaction_deadline: config.transaction_deadline,
        default_slippage: Ratio::from_bps(config.default_slippage_bps).unwrap_or_else(|e| {
            panic!(
                "invalid default-slippage-bps {}: {e}",
                config.default_slippage_bps
            )
        }),
        assume_approved: config.assume_approved,
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::address,
        std::{io::Write, time::Duration},
    };

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_example_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("example.toml");
        let config = load(eth::ChainId(1), &path).await;
        assert_eq!(
            config.vault,
            address!("0x0000000000000000000000000000000000001234")
        );
        assert_eq!(config.gas_margin, GasMargin::DEFAULT);
        assert_eq!(config.transaction_deadline, Duration::from_secs(20 * 60));
        assert_eq!(config.default_slippage, Ratio::from_bps(500).unwrap());
        assert!(!config.assume_approved);
    }

    #[tokio::test]
    async fn applies_defaults_and_chain_overrides() {
        let file = write(
            r#"
            vault = "0x0000000000000000000000000000000000001234"

            [contracts]
            weth = "0x0000000000000000000000000000000000000042"

            [[gas-margin-override]]
            chain-id = 100
            bps = 3000
            "#,
        );

        let mainnet = load(eth::ChainId(1), file.path()).await;
        assert_eq!(mainnet.gas_margin, GasMargin::from_bps(2_000));
        assert_eq!(mainnet.transaction_deadline, Duration::from_secs(30 * 60));
        assert_eq!(
            mainnet.contracts.weth,
            Some(address!("0x0000000000000000000000000000000000000042"))
        );
        assert_eq!(mainnet.contracts.router, None);

        let gnosis = load(eth::ChainId(100), file.path()).await;
        assert_eq!(gnosis.gas_margin, GasMargin::from_bps(3_000));
    }

    #[tokio::test]
    #[should_panic(expected = "does not match")]
    async fn rejects_chain_mismatch() {
        let file = write(
            r#"
            chain-id = 100
            vault = "0x0000000000000000000000000000000000001234"
            "#,
        );
        load(eth::ChainId(1), file.path()).await;
    }

    #[tokio::test]
    #[should_panic(expected = "TOML syntax error")]
    async fn rejects_unknown_fields() {
        let file = write(
            r#"
            vault = "0x0000000000000000000000000000000000001234"
            gas-margin = 10
            "#,
        );
        load(eth::ChainId(1), file.path()).await;
    }
}
