//! Runtime configuration for the gateway.
//!
//! All chain-facing settings come from the environment. The signing key and
//! the deployed contract address have no defaults: without them the process
//! cannot do anything useful, so startup fails instead of limping along.

use std::env;

use thiserror::Error;

/// Default JSON-RPC endpoint (local hardhat node).
pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:8545";
/// Default chain id (local hardhat network).
pub const DEFAULT_CHAIN_ID: u64 = 31337;
/// Default API listen port.
pub const DEFAULT_API_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Gateway configuration, normally built from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint of the chain node.
    pub provider_url: String,
    /// Hex-encoded signing key for contract writes.
    pub private_key: String,
    /// Address of the deployed LendingPlatform contract.
    pub contract_address: String,
    /// Chain id the signer is bound to.
    pub chain_id: u64,
    /// Port the HTTP API listens on.
    pub api_port: u16,
    /// Serve the built-in sample loans when the chain is unreachable.
    pub serve_fallback_loans: bool,
}

impl Config {
    /// Read configuration from the environment. `PRIVATE_KEY` and
    /// `CONTRACT_ADDRESS` are required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let private_key =
            env::var("PRIVATE_KEY").map_err(|_| ConfigError::MissingVar("PRIVATE_KEY"))?;
        let contract_address = env::var("CONTRACT_ADDRESS")
            .map_err(|_| ConfigError::MissingVar("CONTRACT_ADDRESS"))?;

        let provider_url =
            env::var("PROVIDER_URL").unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string());

        let chain_id = match env::var("CHAIN_ID") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "CHAIN_ID",
                value: raw,
            })?,
            Err(_) => DEFAULT_CHAIN_ID,
        };

        let api_port = match env::var("API_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "API_PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_API_PORT,
        };

        let serve_fallback_loans = matches!(
            env::var("SERVE_FALLBACK_LOANS").as_deref(),
            Ok("1") | Ok("true") | Ok("yes")
        );

        Ok(Self {
            provider_url,
            private_key,
            contract_address,
            chain_id,
            api_port,
            serve_fallback_loans,
        })
    }
}

impl Default for Config {
    /// Test configuration against a local hardhat node. The key is the first
    /// well-known hardhat developer account, not a live credential.
    fn default() -> Self {
        Self {
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            private_key: "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .to_string(),
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            api_port: DEFAULT_API_PORT,
            serve_fallback_loans: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_private_key_is_fatal() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PRIVATE_KEY");
        env::remove_var("CONTRACT_ADDRESS");
        match Config::from_env() {
            Err(ConfigError::MissingVar("PRIVATE_KEY")) => {}
            other => panic!("expected MissingVar(PRIVATE_KEY), got {other:?}"),
        }
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("PRIVATE_KEY", "00".repeat(32));
        env::set_var("CONTRACT_ADDRESS", "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        env::remove_var("PROVIDER_URL");
        env::remove_var("CHAIN_ID");
        env::remove_var("API_PORT");
        env::remove_var("SERVE_FALLBACK_LOANS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.provider_url, DEFAULT_PROVIDER_URL);
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.api_port, DEFAULT_API_PORT);
        assert!(!config.serve_fallback_loans);

        env::remove_var("PRIVATE_KEY");
        env::remove_var("CONTRACT_ADDRESS");
    }

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
}
