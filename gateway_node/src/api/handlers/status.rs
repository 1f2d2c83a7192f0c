//! Health endpoint.

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::api::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub contract: String,
    pub signer: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        contract: format!("{:?}", state.chain.contract_address()),
        signer: format!("{:?}", state.chain.signer_address()),
    })
}
