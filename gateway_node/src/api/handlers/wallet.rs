//! Wallet session routes.
//!
//! The portfolio here is the dashboard's local bookkeeping, not chain
//! state: balances are USD figures and the log entries carry placeholder
//! hashes. Sessions are opened and closed explicitly.

use axum::{
    extract::{Path, State},
    response::Json,
};
use log::info;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::server::AppState;
use crate::api::validation::validate_address;
use crate::utils::currency::format_usd;
use crate::wallet::{WalletAssets, WalletSession, WalletTransaction};

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    pub account: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub message: String,
    pub account: String,
    pub assets: WalletAssets,
}

/// POST /api/wallet/connect
pub async fn connect_wallet(
    State(state): State<AppState>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<ConnectResponse>, ApiError> {
    let account = req
        .account
        .ok_or_else(|| ApiError::missing_fields(&["account"]))?;
    validate_address(&account)?;

    let session = state.wallets.connect(&account);
    info!("wallet session opened for {account}");

    Ok(Json(ConnectResponse {
        message: "Wallet connected".to_string(),
        account: session.account,
        assets: session.assets,
    }))
}

/// POST /api/wallet/disconnect
pub async fn disconnect_wallet(
    State(state): State<AppState>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<ConnectResponse>, ApiError> {
    let account = req
        .account
        .ok_or_else(|| ApiError::missing_fields(&["account"]))?;

    let session = state.wallets.disconnect(&account)?;
    info!("wallet session closed for {account}");

    Ok(Json(ConnectResponse {
        message: "Wallet disconnected".to_string(),
        account: session.account,
        assets: session.assets,
    }))
}

/// Portfolio snapshot plus the derived figures the dashboard shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub account: String,
    pub assets: WalletAssets,
    pub transactions: Vec<WalletTransaction>,
    pub total_balance: f64,
    pub total_balance_formatted: String,
    pub total_returns: f64,
    pub total_returns_formatted: String,
    /// All-time return on invested capital, percent.
    pub portfolio_health: f64,
}

impl From<WalletSession> for PortfolioResponse {
    fn from(session: WalletSession) -> Self {
        let assets = session.assets;
        let total_balance = assets.available + assets.invested;
        let total_returns = assets.returns + assets.pending;
        let portfolio_health = if assets.invested > 0.0 {
            (assets.returns / assets.invested * 1000.0).round() / 10.0
        } else {
            0.0
        };
        Self {
            account: session.account,
            assets,
            transactions: session.transactions,
            total_balance,
            total_balance_formatted: format_usd(total_balance),
            total_returns,
            total_returns_formatted: format_usd(total_returns),
            portfolio_health,
        }
    }
}

/// GET /api/wallet/:account
pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let session = state.wallets.session(&account)?;
    Ok(Json(PortfolioResponse::from(session)))
}

#[derive(Debug, Deserialize)]
pub struct MutationRequest {
    pub amount: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub message: String,
    pub transaction: WalletTransaction,
    pub assets: WalletAssets,
}

fn apply<F>(state: &AppState, account: &str, message: &str, f: F) -> Result<Json<MutationResponse>, ApiError>
where
    F: FnOnce(&mut WalletSession) -> Result<WalletTransaction, crate::wallet::WalletError>,
{
    let (session, transaction) = state.wallets.with_session(account, f)?;
    Ok(Json(MutationResponse {
        message: message.to_string(),
        transaction,
        assets: session.assets,
    }))
}

/// POST /api/wallet/:account/deposit
pub async fn deposit(
    State(state): State<AppState>,
    Path(account): Path<String>,
    Json(req): Json<MutationRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let amount = req
        .amount
        .ok_or_else(|| ApiError::missing_fields(&["amount"]))?;
    apply(&state, &account, "Deposit recorded", |s| {
        s.record_deposit(amount).cloned()
    })
}

/// POST /api/wallet/:account/withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    Path(account): Path<String>,
    Json(req): Json<MutationRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let amount = req
        .amount
        .ok_or_else(|| ApiError::missing_fields(&["amount"]))?;
    apply(&state, &account, "Withdrawal recorded", |s| {
        s.record_withdrawal(amount).cloned()
    })
}

/// POST /api/wallet/:account/invest
///
/// Local bookkeeping for an investment the caller already settled through
/// the loan routes: moves available funds to invested and logs the entry
/// in one step.
pub async fn invest_locally(
    State(state): State<AppState>,
    Path(account): Path<String>,
    Json(req): Json<MutationRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let amount = req
        .amount
        .ok_or_else(|| ApiError::missing_fields(&["amount"]))?;
    apply(&state, &account, "Investment recorded", |s| {
        s.record_investment(amount).cloned()
    })
}
