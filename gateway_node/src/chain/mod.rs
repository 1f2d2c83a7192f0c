//! Access to the externally deployed LendingPlatform contract.
//!
//! The contract owns all loan accounting; this module only marshals typed
//! calls to it and mirrors its state into display-friendly records.

pub mod client;
pub mod contract;
pub mod types;

pub use client::{ChainClient, ChainError, TxOutcome};
pub use types::{InvestmentRejection, Loan, LoanRecord, PropertyRecord};
