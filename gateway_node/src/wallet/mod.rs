//! In-memory wallet portfolio bookkeeping.
//!
//! Each connected account gets a session holding its USD asset balances and
//! a newest-first transaction log. Sessions live for the process lifetime
//! only; durable balances stay on chain. Balance changes and their log
//! entries are computed inside a single mutation so the two can never
//! drift apart.

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no wallet session for account {0}")]
    NotConnected(String),
    #[error("amount must be a positive finite number, got {0}")]
    InvalidAmount(f64),
    #[error("insufficient available balance: requested {requested}, available {available}")]
    InsufficientAvailable { requested: f64, available: f64 },
}

/// USD balances tracked per session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WalletAssets {
    pub available: f64,
    pub invested: f64,
    pub returns: f64,
    pub pending: f64,
}

/// Partial asset update; only the provided fields are replaced.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AssetsPatch {
    pub available: Option<f64>,
    pub invested: Option<f64>,
    pub returns: Option<f64>,
    pub pending: Option<f64>,
}

/// One entry in the session transaction log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub status: String,
    pub date: String,
    pub hash: String,
}

/// Portfolio state for one connected account.
#[derive(Debug, Clone, Serialize)]
pub struct WalletSession {
    pub account: String,
    pub assets: WalletAssets,
    /// Newest first.
    pub transactions: Vec<WalletTransaction>,
}

impl WalletSession {
    /// Fresh session seeded with the demo portfolio.
    pub fn new(account: &str) -> Self {
        Self {
            account: account.to_string(),
            assets: WalletAssets {
                available: 12_500.0,
                invested: 45_000.0,
                returns: 3_750.0,
                pending: 1_500.0,
            },
            transactions: seed_transactions(),
        }
    }

    /// Shallow-merge the provided asset fields. Callers that need the log
    /// kept in sync should use the `record_*` transitions instead.
    pub fn update_assets(&mut self, patch: AssetsPatch) {
        if let Some(v) = patch.available {
            self.assets.available = v;
        }
        if let Some(v) = patch.invested {
            self.assets.invested = v;
        }
        if let Some(v) = patch.returns {
            self.assets.returns = v;
        }
        if let Some(v) = patch.pending {
            self.assets.pending = v;
        }
    }

    /// Prepend a log entry with a generated id and placeholder hash. The
    /// hash is display filler, not a chain transaction hash.
    pub fn add_transaction(&mut self, kind: &str, amount: f64) -> &WalletTransaction {
        let entry = WalletTransaction {
            id: Utc::now().timestamp_millis() as u64,
            kind: kind.to_string(),
            amount,
            status: "completed".to_string(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            hash: placeholder_hash(),
        };
        self.transactions.insert(0, entry);
        &self.transactions[0]
    }

    /// Deposit into the available balance.
    pub fn record_deposit(&mut self, amount: f64) -> Result<&WalletTransaction, WalletError> {
        check_amount(amount)?;
        self.assets.available += amount;
        Ok(self.add_transaction("Deposit", amount))
    }

    /// Withdraw from the available balance.
    pub fn record_withdrawal(&mut self, amount: f64) -> Result<&WalletTransaction, WalletError> {
        check_amount(amount)?;
        if amount > self.assets.available {
            return Err(WalletError::InsufficientAvailable {
                requested: amount,
                available: self.assets.available,
            });
        }
        self.assets.available -= amount;
        Ok(self.add_transaction("Withdrawal", -amount))
    }

    /// Move funds from available to invested and log the investment, as one
    /// transition.
    pub fn record_investment(&mut self, amount: f64) -> Result<&WalletTransaction, WalletError> {
        check_amount(amount)?;
        if amount > self.assets.available {
            return Err(WalletError::InsufficientAvailable {
                requested: amount,
                available: self.assets.available,
            });
        }
        self.assets.available -= amount;
        self.assets.invested += amount;
        Ok(self.add_transaction("Investment", -amount))
    }

    /// Credit realized returns.
    pub fn record_return(&mut self, amount: f64) -> Result<&WalletTransaction, WalletError> {
        check_amount(amount)?;
        self.assets.returns += amount;
        Ok(self.add_transaction("Return", amount))
    }
}

fn check_amount(amount: f64) -> Result<(), WalletError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(WalletError::InvalidAmount(amount))
    }
}

fn placeholder_hash() -> String {
    format!(
        "0x{:08x}...{:08x}",
        rand::random::<u32>(),
        rand::random::<u32>()
    )
}

fn seed_transactions() -> Vec<WalletTransaction> {
    vec![
        WalletTransaction {
            id: 1,
            kind: "Deposit".to_string(),
            amount: 5000.0,
            status: "completed".to_string(),
            date: "2024-01-15".to_string(),
            hash: "0x1234...5678".to_string(),
        },
        WalletTransaction {
            id: 2,
            kind: "Investment".to_string(),
            amount: -2500.0,
            status: "completed".to_string(),
            date: "2024-01-14".to_string(),
            hash: "0x8765...4321".to_string(),
        },
        WalletTransaction {
            id: 3,
            kind: "Return".to_string(),
            amount: 375.0,
            status: "completed".to_string(),
            date: "2024-01-13".to_string(),
            hash: "0x9876...1234".to_string(),
        },
        WalletTransaction {
            id: 4,
            kind: "Withdrawal".to_string(),
            amount: -1000.0,
            status: "pending".to_string(),
            date: "2024-01-12".to_string(),
            hash: "0x4567...8901".to_string(),
        },
    ]
}

/// Session store with an explicit connect/disconnect lifecycle, keyed by
/// account address.
#[derive(Debug, Default)]
pub struct WalletRegistry {
    sessions: DashMap<String, WalletSession>,
}

impl WalletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for the account, seeding a fresh portfolio on first
    /// connect. Reconnecting returns the existing session unchanged.
    pub fn connect(&self, account: &str) -> WalletSession {
        self.sessions
            .entry(account.to_string())
            .or_insert_with(|| WalletSession::new(account))
            .clone()
    }

    /// Tear down the session. Returns the final state, or an error if the
    /// account was never connected.
    pub fn disconnect(&self, account: &str) -> Result<WalletSession, WalletError> {
        self.sessions
            .remove(account)
            .map(|(_, session)| session)
            .ok_or_else(|| WalletError::NotConnected(account.to_string()))
    }

    /// Snapshot of a connected session.
    pub fn session(&self, account: &str) -> Result<WalletSession, WalletError> {
        self.sessions
            .get(account)
            .map(|s| s.clone())
            .ok_or_else(|| WalletError::NotConnected(account.to_string()))
    }

    pub fn is_connected(&self, account: &str) -> bool {
        self.sessions.contains_key(account)
    }

    /// Run a mutation against a connected session and return the updated
    /// snapshot together with the mutation's log entry.
    pub fn with_session<F>(
        &self,
        account: &str,
        f: F,
    ) -> Result<(WalletSession, WalletTransaction), WalletError>
    where
        F: FnOnce(&mut WalletSession) -> Result<WalletTransaction, WalletError>,
    {
        let mut entry = self
            .sessions
            .get_mut(account)
            .ok_or_else(|| WalletError::NotConnected(account.to_string()))?;
        let tx = f(entry.value_mut())?;
        Ok((entry.clone(), tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transaction_lands_first_with_completed_status() {
        let mut session = WalletSession::new("0xabc");
        session.add_transaction("Deposit", 500.0);
        let first = &session.transactions[0];
        assert_eq!(first.kind, "Deposit");
        assert_eq!(first.amount, 500.0);
        assert_eq!(first.status, "completed");
        assert!(first.hash.starts_with("0x"));
    }

    #[test]
    fn investment_moves_available_to_invested_atomically() {
        let mut session = WalletSession::new("0xabc");
        let before = session.assets;
        let log_len = session.transactions.len();

        session.record_investment(2000.0).unwrap();
        assert_eq!(session.assets.available, before.available - 2000.0);
        assert_eq!(session.assets.invested, before.invested + 2000.0);
        assert_eq!(session.transactions.len(), log_len + 1);
        assert_eq!(session.transactions[0].amount, -2000.0);
    }

    #[test]
    fn rejected_investment_leaves_assets_and_log_untouched() {
        let mut session = WalletSession::new("0xabc");
        let before = session.assets;
        let log_len = session.transactions.len();

        let err = session.record_investment(1_000_000.0).unwrap_err();
        assert!(matches!(err, WalletError::InsufficientAvailable { .. }));
        assert_eq!(session.assets.available, before.available);
        assert_eq!(session.assets.invested, before.invested);
        assert_eq!(session.transactions.len(), log_len);
    }

    #[test]
    fn withdrawal_respects_available_balance() {
        let mut session = WalletSession::new("0xabc");
        session.record_withdrawal(500.0).unwrap();
        assert_eq!(session.assets.available, 12_000.0);
        assert!(session.record_withdrawal(999_999.0).is_err());
        assert!(session.record_withdrawal(-5.0).is_err());
    }

    #[test]
    fn returns_are_credited_and_logged_together() {
        let mut session = WalletSession::new("0xabc");
        session.record_return(375.0).unwrap();
        assert_eq!(session.assets.returns, 4_125.0);
        assert_eq!(session.transactions[0].kind, "Return");
        assert_eq!(session.transactions[0].amount, 375.0);
        assert!(session.record_return(f64::NAN).is_err());
    }

    #[test]
    fn update_assets_merges_only_given_fields() {
        let mut session = WalletSession::new("0xabc");
        session.update_assets(AssetsPatch {
            available: Some(100.0),
            ..Default::default()
        });
        assert_eq!(session.assets.available, 100.0);
        assert_eq!(session.assets.invested, 45_000.0);
    }

    #[test]
    fn registry_lifecycle() {
        let registry = WalletRegistry::new();
        assert!(!registry.is_connected("0xabc"));

        registry.connect("0xabc");
        assert!(registry.is_connected("0xabc"));

        let (session, tx) = registry
            .with_session("0xabc", |s| s.record_deposit(100.0).cloned())
            .unwrap();
        assert_eq!(tx.kind, "Deposit");
        assert_eq!(session.assets.available, 12_600.0);

        registry.disconnect("0xabc").unwrap();
        assert!(registry.session("0xabc").is_err());
        assert!(matches!(
            registry.disconnect("0xabc"),
            Err(WalletError::NotConnected(_))
        ));
    }
}
