//! Auto-invest strategy routes.

use axum::{
    extract::{Path, State},
    response::Json,
};
use log::info;
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::api::server::AppState;
use crate::api::validation::validate_address;
use crate::strategy::AutoInvestStrategy;

/// GET /api/auto-invest/:account
///
/// Accounts that never saved a strategy read the defaults.
pub async fn get_strategy(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<AutoInvestStrategy>, ApiError> {
    validate_address(&account)?;
    Ok(Json(state.strategies.get(&account)))
}

#[derive(Debug, Serialize)]
pub struct PutStrategyResponse {
    pub message: String,
    pub strategy: AutoInvestStrategy,
}

/// PUT /api/auto-invest/:account
pub async fn put_strategy(
    State(state): State<AppState>,
    Path(account): Path<String>,
    Json(strategy): Json<AutoInvestStrategy>,
) -> Result<Json<PutStrategyResponse>, ApiError> {
    validate_address(&account)?;
    let strategy = state.strategies.put(&account, strategy)?;
    info!(
        "auto-invest strategy saved for {account} (enabled: {})",
        strategy.enabled
    );
    Ok(Json(PutStrategyResponse {
        message: "Strategy saved".to_string(),
        strategy,
    }))
}
