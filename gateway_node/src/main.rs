use anyhow::Result;
use clap::Parser;
use log::info;

use estatechain_gateway::api::start_api_server;
use estatechain_gateway::config::Config;

/// EstateChain lending gateway.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Override the API_PORT environment variable.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.api_port = port;
    }

    info!(
        "starting estatechain gateway v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.provider_url
    );

    start_api_server(config).await
}
