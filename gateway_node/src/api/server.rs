//! Router wiring and server startup.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{loans, properties, status, strategy, wallet};
use crate::chain::ChainClient;
use crate::config::Config;
use crate::strategy::StrategyStore;
use crate::wallet::WalletRegistry;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<ChainClient>,
    pub wallets: Arc<WalletRegistry>,
    pub strategies: Arc<StrategyStore>,
    /// Serve the built-in sample loans when the chain is unreachable.
    pub serve_fallback_loans: bool,
}

impl AppState {
    pub fn new(chain: ChainClient, serve_fallback_loans: bool) -> Self {
        Self {
            chain: Arc::new(chain),
            wallets: Arc::new(WalletRegistry::new()),
            strategies: Arc::new(StrategyStore::new()),
            serve_fallback_loans,
        }
    }
}

/// Build the full route table. Requests with the wrong method on a known
/// path answer 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(status::health_check))
        // Loan routes
        .route("/api/create-loan", post(loans::create_loan))
        .route("/api/get-loans", get(loans::get_loans))
        .route("/api/invest-in-loan", post(loans::invest_in_loan))
        // Property routes
        .route("/api/verify-property", post(properties::verify_property))
        .route("/api/add-property", post(properties::add_property))
        .route("/api/properties/:hash", get(properties::get_property))
        .route(
            "/api/property-images/:type/:id",
            get(properties::get_property_images),
        )
        // Wallet session routes
        .route("/api/wallet/connect", post(wallet::connect_wallet))
        .route("/api/wallet/disconnect", post(wallet::disconnect_wallet))
        .route("/api/wallet/:account", get(wallet::get_portfolio))
        .route("/api/wallet/:account/deposit", post(wallet::deposit))
        .route("/api/wallet/:account/withdraw", post(wallet::withdraw))
        .route("/api/wallet/:account/invest", post(wallet::invest_locally))
        // Auto-invest strategy routes
        .route(
            "/api/auto-invest/:account",
            get(strategy::get_strategy).put(strategy::put_strategy),
        )
        // CORS for the dashboard
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Connect the chain client, bind the listener and serve until shutdown.
pub async fn start_api_server(config: Config) -> Result<()> {
    let chain = ChainClient::connect(&config)?;
    info!(
        "gateway signing as {:?} against contract {:?}",
        chain.signer_address(),
        chain.contract_address()
    );

    let state = AppState::new(chain, config.serve_fallback_loans);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.api_port)).await?;
    info!("gateway API listening on http://0.0.0.0:{}", config.api_port);
    info!("  GET  /health                        - Health check");
    info!("  POST /api/create-loan               - Submit a loan request");
    info!("  GET  /api/get-loans                 - List all loans");
    info!("  POST /api/invest-in-loan            - Invest in a loan");
    info!("  POST /api/verify-property           - Verify a property (admin signer)");
    info!("  POST /api/add-property              - Register a property");
    info!("  GET  /api/properties/:hash          - Property status");
    info!("  GET  /api/property-images/:type/:id - Bundled listing images");
    info!("  POST /api/wallet/connect            - Open a wallet session");
    info!("  GET  /api/wallet/:account           - Portfolio snapshot");
    info!("  GET  /api/auto-invest/:account      - Auto-invest strategy");

    axum::serve(listener, app).await?;

    Ok(())
}
