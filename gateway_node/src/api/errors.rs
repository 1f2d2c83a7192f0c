//! API error responses.
//!
//! Every failure serializes as `{error, details?, code, timestamp}`.
//! External-call failures carry the raw underlying message plus the
//! contract and signer addresses involved, so a failing deployment can be
//! diagnosed straight from the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chain::ChainError;
use crate::strategy::StrategyError;
use crate::wallet::WalletError;

/// JSON error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: u16,
    #[serde(rename = "error")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: u64,
}

impl ApiError {
    pub fn new(code: u16, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            timestamp: chrono::Utc::now().timestamp() as u64,
        }
    }

    pub fn with_details(code: u16, message: String, details: serde_json::Value) -> Self {
        Self {
            code,
            message,
            details: Some(details),
            timestamp: chrono::Utc::now().timestamp() as u64,
        }
    }

    // Common error constructors
    pub fn bad_request(message: &str) -> Self {
        Self::new(400, message.to_string())
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(404, message.to_string())
    }

    pub fn internal_server_error(message: &str) -> Self {
        Self::new(500, message.to_string())
    }

    // Gateway-specific errors
    pub fn missing_fields(missing: &[&str]) -> Self {
        Self::with_details(
            400,
            "Missing required parameters".to_string(),
            serde_json::json!({ "missing": missing }),
        )
    }

    pub fn loan_not_active(loan_id: &str, current_amount: &str, funded_amount: &str) -> Self {
        Self::with_details(
            400,
            "Loan is not active".to_string(),
            serde_json::json!({
                "loanId": loan_id,
                "currentAmount": current_amount,
                "fundedAmount": funded_amount
            }),
        )
    }

    pub fn investment_exceeds_remaining(remaining_eth: &str, requested_eth: &str) -> Self {
        Self::with_details(
            400,
            "Investment exceeds remaining loan capacity".to_string(),
            serde_json::json!({
                "remainingAmount": remaining_eth,
                "requestedAmount": requested_eth
            }),
        )
    }

    pub fn contract_not_deployed(address: &str) -> Self {
        Self::with_details(
            500,
            "Contract not properly deployed".to_string(),
            serde_json::json!({
                "address": address,
                "suggestion": "Redeploy the contract and update CONTRACT_ADDRESS"
            }),
        )
    }

    pub fn contract_call_failed(reason: &str, contract: &str, signer: &str) -> Self {
        Self::with_details(
            500,
            "Contract call failed".to_string(),
            serde_json::json!({
                "details": reason,
                "contractAddress": contract,
                "signerAddress": signer
            }),
        )
    }

    pub fn wallet_not_connected(account: &str) -> Self {
        Self::with_details(
            404,
            "Wallet not connected".to_string(),
            serde_json::json!({ "account": account }),
        )
    }

    pub fn insufficient_available(requested: f64, available: f64) -> Self {
        Self::with_details(
            400,
            "Insufficient available balance".to_string(),
            serde_json::json!({
                "requestedAmount": requested,
                "availableAmount": available
            }),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API Error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<ChainError> for ApiError {
    fn from(err: ChainError) -> Self {
        Self::internal_server_error(&err.to_string())
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::NotConnected(account) => Self::wallet_not_connected(&account),
            WalletError::InvalidAmount(amount) => Self::with_details(
                400,
                "Invalid amount".to_string(),
                serde_json::json!({ "amount": amount }),
            ),
            WalletError::InsufficientAvailable {
                requested,
                available,
            } => Self::insufficient_available(requested, available),
        }
    }
}

impl From<StrategyError> for ApiError {
    fn from(err: StrategyError) -> Self {
        Self::bad_request(&err.to_string())
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_error_field() {
        let err = ApiError::contract_not_deployed("0x0000000000000000000000000000000000000000");
        let value = serde_json::to_value(&err).unwrap();
        assert!(value["error"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains("deployed"));
        assert_eq!(value["code"], 500);
        assert_eq!(
            value["details"]["address"],
            "0x0000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn over_capacity_error_reports_remaining_amount() {
        let err = ApiError::investment_exceeds_remaining("0.5", "0.6");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["code"], 400);
        assert_eq!(value["details"]["remainingAmount"], "0.5");
        assert_eq!(value["details"]["requestedAmount"], "0.6");
    }

    #[test]
    fn wallet_errors_map_to_client_codes() {
        let not_connected: ApiError = WalletError::NotConnected("0xabc".to_string()).into();
        assert_eq!(not_connected.code, 404);

        let short: ApiError = WalletError::InsufficientAvailable {
            requested: 10.0,
            available: 5.0,
        }
        .into();
        assert_eq!(short.code, 400);
    }
}
