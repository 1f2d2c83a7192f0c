//! Loan routes: creation, listing, investment.

use axum::{extract::State, response::Json};
use ethers::types::U256;
use ethers::utils::{format_ether, parse_ether, to_checksum};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::handlers::NumericField;
use crate::api::server::AppState;
use crate::chain::types::fallback_loans;
use crate::chain::LoanRecord;

/// Request body for loan creation. All four fields are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    pub amount: Option<NumericField>,
    pub interest_rate: Option<NumericField>,
    pub duration: Option<NumericField>,
    pub property_address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    pub tx: String,
}

/// POST /api/create-loan
pub async fn create_loan(
    State(state): State<AppState>,
    Json(req): Json<CreateLoanRequest>,
) -> Result<Json<CreateLoanResponse>, ApiError> {
    let mut missing = Vec::new();
    if req.amount.is_none() {
        missing.push("amount");
    }
    if req.interest_rate.is_none() {
        missing.push("interestRate");
    }
    if req.duration.is_none() {
        missing.push("duration");
    }
    if req.property_address.is_none() {
        missing.push("propertyAddress");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let amount = req.amount.unwrap().0;
    let interest_rate = req.interest_rate.unwrap().0;
    let duration = req.duration.unwrap().0;
    let property_address = req.property_address.unwrap();

    // Conversion failures surface as server errors, matching the rest of
    // the submission path.
    let amount_wei =
        parse_ether(&amount).map_err(|e| ApiError::internal_server_error(&e.to_string()))?;
    let interest_rate = U256::from_dec_str(interest_rate.trim())
        .map_err(|e| ApiError::internal_server_error(&e.to_string()))?;
    let duration = U256::from_dec_str(duration.trim())
        .map_err(|e| ApiError::internal_server_error(&e.to_string()))?;

    let (outcome, event) = state
        .chain
        .submit_create_loan(amount_wei, interest_rate, duration, property_address)
        .await
        .map_err(|e| {
            error!("create-loan failed: {e}");
            ApiError::internal_server_error(&e.to_string())
        })?;

    match event {
        Some(event) => {
            info!(
                "loan {} created by {} in {}",
                event.loan_id,
                to_checksum(&event.borrower, None),
                outcome.tx_hash
            );
            Ok(Json(CreateLoanResponse {
                message: "Loan created".to_string(),
                loan_id: Some(event.loan_id.to_string()),
                borrower: Some(to_checksum(&event.borrower, None)),
                amount: Some(format_ether(event.amount)),
                tx: outcome.tx_hash,
            }))
        }
        None => {
            // Mined but the expected event is missing; report success with
            // the hash so the caller can inspect the receipt themselves.
            warn!("create-loan mined without a LoanCreated event: {}", outcome.tx_hash);
            Ok(Json(CreateLoanResponse {
                message: "Loan created but no event found".to_string(),
                loan_id: None,
                borrower: None,
                amount: None,
                tx: outcome.tx_hash,
            }))
        }
    }
}

/// Where a loan listing came from.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    /// Read from the contract just now.
    Live,
    /// Built-in sample data; the chain was unreachable.
    Fallback,
}

#[derive(Debug, Serialize)]
pub struct LoanFeedResponse {
    pub source: FeedSource,
    pub loans: Vec<LoanRecord>,
}

/// GET /api/get-loans
pub async fn get_loans(
    State(state): State<AppState>,
) -> Result<Json<LoanFeedResponse>, ApiError> {
    let contract = format!("{:?}", state.chain.contract_address());
    let signer = format!("{:?}", state.chain.signer_address());

    match state.chain.deployed_code_present().await {
        // An address with no bytecode is a deployment problem, never a
        // reason to serve sample data.
        Ok(false) => {
            error!("no bytecode at contract address {contract}");
            return Err(ApiError::contract_not_deployed(&contract));
        }
        Ok(true) => {}
        Err(e) => {
            error!("bytecode check failed: {e}");
            return fallback_or(
                ApiError::contract_call_failed(&e.to_string(), &contract, &signer),
                &state,
            );
        }
    }

    match state.chain.fetch_all_loans().await {
        Ok(loans) => Ok(Json(LoanFeedResponse {
            source: FeedSource::Live,
            loans: loans.iter().map(LoanRecord::from).collect(),
        })),
        Err(e) => {
            error!("getAllLoans failed against {contract}: {e}");
            fallback_or(
                ApiError::contract_call_failed(&e.to_string(), &contract, &signer),
                &state,
            )
        }
    }
}

/// Serve the sample listings instead of the error when the operator opted
/// in; the payload says so explicitly either way.
fn fallback_or(
    err: ApiError,
    state: &AppState,
) -> Result<Json<LoanFeedResponse>, ApiError> {
    if state.serve_fallback_loans {
        warn!("serving fallback loan listings");
        Ok(Json(LoanFeedResponse {
            source: FeedSource::Fallback,
            loans: fallback_loans(),
        }))
    } else {
        Err(err)
    }
}

/// Request body for an investment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestRequest {
    pub loan_id: Option<NumericField>,
    pub amount: Option<NumericField>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestResponse {
    pub message: String,
    pub loan_id: String,
    pub amount: String,
    pub tx: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

/// POST /api/invest-in-loan
pub async fn invest_in_loan(
    State(state): State<AppState>,
    Json(req): Json<InvestRequest>,
) -> Result<Json<InvestResponse>, ApiError> {
    let mut missing = Vec::new();
    if req.loan_id.is_none() {
        missing.push("loanId");
    }
    if req.amount.is_none() {
        missing.push("amount");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let loan_id_raw = req.loan_id.unwrap().0;
    let amount_raw = req.amount.unwrap().0;

    let loan_id = U256::from_dec_str(loan_id_raw.trim())
        .map_err(|_| ApiError::bad_request("Invalid loanId"))?;
    let amount_wei =
        parse_ether(&amount_raw).map_err(|_| ApiError::bad_request("Invalid amount"))?;

    // Re-read the loan so stale dashboards cannot push a doomed call.
    let loan = state.chain.fetch_loan(loan_id).await.map_err(|e| {
        error!("loan {loan_id} read failed: {e}");
        ApiError::internal_server_error(&e.to_string())
    })?;

    if let Err(rejection) = loan.accepts_investment(amount_wei) {
        use crate::chain::InvestmentRejection;
        return Err(match rejection {
            InvestmentRejection::Inactive => ApiError::loan_not_active(
                &loan_id_raw,
                &format_ether(loan.amount),
                &format_ether(loan.funded_amount),
            ),
            InvestmentRejection::ExceedsRemaining { remaining } => {
                ApiError::investment_exceeds_remaining(
                    &format_ether(remaining),
                    &format_ether(amount_wei),
                )
            }
        });
    }

    let outcome = state
        .chain
        .submit_investment(loan_id, amount_wei)
        .await
        .map_err(|e| {
            error!("invest in loan {loan_id} failed: {e}");
            ApiError::internal_server_error(&e.to_string())
        })?;

    info!(
        "investment of {} wei in loan {loan_id} mined in {}",
        amount_wei, outcome.tx_hash
    );

    Ok(Json(InvestResponse {
        message: "Investment successful".to_string(),
        loan_id: loan_id_raw,
        amount: amount_raw,
        tx: outcome.tx_hash,
        block_number: outcome.block_number,
    }))
}
