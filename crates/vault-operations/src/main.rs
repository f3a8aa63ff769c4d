#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vault_operations::main().await
}
