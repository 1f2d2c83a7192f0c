//! Signing client for the LendingPlatform contract.
//!
//! One client is built at startup from configuration and shared across
//! requests. There is no retry or timeout layer: a failed call surfaces to
//! the caller, a hung node call hangs the request.

use std::sync::Arc;

use ethers::abi::RawLog;
use ethers::contract::EthLogDecode;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider, ProviderError};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, TransactionReceipt, U256};
use thiserror::Error;

use crate::chain::contract::{LendingPlatform, LoanCreatedFilter};
use crate::chain::types::{Loan, PropertyRecord};
use crate::config::Config;

/// Gas ceiling for payable invest calls.
pub const INVEST_GAS_LIMIT: u64 = 500_000;

pub type GatewayMiddleware = SignerMiddleware<Provider<Http>, LocalWallet>;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("invalid provider url {0}")]
    InvalidProviderUrl(String),
    #[error("invalid signing key")]
    InvalidSigningKey,
    #[error("invalid contract address {0}")]
    InvalidContractAddress(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("{0}")]
    Call(String),
    #[error("transaction dropped before it was mined")]
    TransactionDropped,
}

/// Outcome of a mined transaction.
#[derive(Debug, Clone)]
pub struct TxOutcome {
    pub tx_hash: String,
    pub block_number: Option<u64>,
}

impl TxOutcome {
    fn from_receipt(receipt: &TransactionReceipt) -> Self {
        Self {
            tx_hash: format!("{:?}", receipt.transaction_hash),
            block_number: receipt.block_number.map(|b| b.as_u64()),
        }
    }
}

/// Shared connection to the chain node and the deployed contract.
pub struct ChainClient {
    client: Arc<GatewayMiddleware>,
    contract: LendingPlatform<GatewayMiddleware>,
    contract_address: Address,
}

impl ChainClient {
    /// Build the provider, signer and contract handle. Purely local; the
    /// first network round trip happens on the first call.
    pub fn connect(config: &Config) -> Result<Self, ChainError> {
        let provider = Provider::<Http>::try_from(config.provider_url.as_str())
            .map_err(|_| ChainError::InvalidProviderUrl(config.provider_url.clone()))?;

        let wallet = config
            .private_key
            .parse::<LocalWallet>()
            .map_err(|_| ChainError::InvalidSigningKey)?
            .with_chain_id(config.chain_id);

        let contract_address = config
            .contract_address
            .parse::<Address>()
            .map_err(|_| ChainError::InvalidContractAddress(config.contract_address.clone()))?;

        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        let contract = LendingPlatform::new(contract_address, client.clone());

        Ok(Self {
            client,
            contract,
            contract_address,
        })
    }

    pub fn signer_address(&self) -> Address {
        self.client.signer().address()
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Presence-of-bytecode check for the configured address.
    pub async fn deployed_code_present(&self) -> Result<bool, ChainError> {
        let code = self
            .client
            .get_code(self.contract_address, None)
            .await
            .map_err(|e| ChainError::Call(e.to_string()))?;
        Ok(!code.is_empty())
    }

    /// Bulk read of every loan the contract knows about. No pagination; the
    /// contract exposes none.
    pub async fn fetch_all_loans(&self) -> Result<Vec<Loan>, ChainError> {
        let tuples = self
            .contract
            .get_all_loans()
            .call()
            .await
            .map_err(|e| ChainError::Call(e.to_string()))?;
        Ok(tuples.into_iter().map(Loan::from).collect())
    }

    /// Read a single loan by id.
    pub async fn fetch_loan(&self, loan_id: U256) -> Result<Loan, ChainError> {
        let tuple = self
            .contract
            .loans(loan_id)
            .call()
            .await
            .map_err(|e| ChainError::Call(e.to_string()))?;
        Ok(Loan::from(tuple))
    }

    /// Submit a loan request and wait for it to be mined. Returns the
    /// receipt outcome and the LoanCreated event when one was emitted.
    pub async fn submit_create_loan(
        &self,
        amount: U256,
        interest_rate: U256,
        duration: U256,
        property_address: String,
    ) -> Result<(TxOutcome, Option<LoanCreatedFilter>), ChainError> {
        let call = self
            .contract
            .create_loan(amount, interest_rate, duration, property_address);
        let receipt = Self::mine(call.send().await.map_err(|e| ChainError::Call(e.to_string()))?)
            .await?;

        let event = receipt.logs.iter().find_map(|log| {
            let raw = RawLog {
                topics: log.topics.clone(),
                data: log.data.to_vec(),
            };
            LoanCreatedFilter::decode_log(&raw).ok()
        });

        Ok((TxOutcome::from_receipt(&receipt), event))
    }

    /// Submit a payable investment under the fixed gas ceiling.
    pub async fn submit_investment(
        &self,
        loan_id: U256,
        value: U256,
    ) -> Result<TxOutcome, ChainError> {
        let call = self
            .contract
            .invest(loan_id)
            .value(value)
            .gas(INVEST_GAS_LIMIT);
        let receipt = Self::mine(call.send().await.map_err(|e| ChainError::Call(e.to_string()))?)
            .await?;
        Ok(TxOutcome::from_receipt(&receipt))
    }

    /// Register a property for the signing account.
    pub async fn submit_property_registration(
        &self,
        property_address: String,
    ) -> Result<TxOutcome, ChainError> {
        let call = self.contract.add_property(property_address);
        let receipt = Self::mine(call.send().await.map_err(|e| ChainError::Call(e.to_string()))?)
            .await?;
        Ok(TxOutcome::from_receipt(&receipt))
    }

    /// Mark a property as verified. The contract enforces the admin gate.
    pub async fn submit_property_verification(
        &self,
        property_hash: [u8; 32],
    ) -> Result<TxOutcome, ChainError> {
        let call = self.contract.verify_property(property_hash);
        let receipt = Self::mine(call.send().await.map_err(|e| ChainError::Call(e.to_string()))?)
            .await?;
        Ok(TxOutcome::from_receipt(&receipt))
    }

    /// Read the property mirror for a hash.
    pub async fn fetch_property(&self, property_hash: [u8; 32]) -> Result<PropertyRecord, ChainError> {
        let tuple = self
            .contract
            .properties(property_hash)
            .call()
            .await
            .map_err(|e| ChainError::Call(e.to_string()))?;
        Ok(PropertyRecord::from(tuple))
    }

    async fn mine(
        pending: ethers::providers::PendingTransaction<'_, Http>,
    ) -> Result<TransactionReceipt, ChainError> {
        pending.await?.ok_or(ChainError::TransactionDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_is_offline_and_validates_inputs() {
        let config = Config::default();
        let client = ChainClient::connect(&config).expect("default config connects");
        assert_eq!(
            client.contract_address(),
            config.contract_address.parse::<Address>().unwrap()
        );
        // The default hardhat key resolves to the first developer account.
        assert_eq!(
            format!("{:?}", client.signer_address()),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn bad_inputs_are_rejected_up_front() {
        let mut config = Config::default();
        config.contract_address = "not-an-address".to_string();
        assert!(matches!(
            ChainClient::connect(&config),
            Err(ChainError::InvalidContractAddress(_))
        ));

        let mut config = Config::default();
        config.private_key = "zz".to_string();
        assert!(matches!(
            ChainClient::connect(&config),
            Err(ChainError::InvalidSigningKey)
        ));
    }
}
