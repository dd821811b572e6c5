use hyperliquid_mcp::{HyperliquidClient, McpServer, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // stdout carries the protocol, so all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env();
    for problem in config.validate() {
        warn!("configuration problem: {problem}");
    }

    info!(
        api_url = %config.api_url,
        testnet = config.is_testnet,
        "starting Hyperliquid MCP server"
    );

    let client = HyperliquidClient::new(&config)?;
    if client.can_trade() {
        info!("signing key configured, trading tools enabled");
    } else {
        info!("no signing key configured, running in read-only mode");
    }
    if let Some(address) = client.wallet_address() {
        info!(%address, "default account");
    }

    McpServer::new(client).serve().await?;
    Ok(())
}
