//! Auto-invest strategy storage.
//!
//! The dashboard lets each account describe how idle funds should be
//! deployed; the gateway keeps the saved strategy per account. In-memory
//! only, like the wallet sessions.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("monthly budget must be positive, got {0}")]
    InvalidBudget(f64),
    #[error("minimum interest rate must be within 0..=100, got {0}")]
    InvalidInterestRate(f64),
    #[error("maximum loan amount must be positive, got {0}")]
    InvalidMaxLoanAmount(f64),
    #[error("diversification count must be at least 1, got {0}")]
    InvalidDiversification(u32),
    #[error("unknown property condition grade {0:?}, expected A, B or C")]
    InvalidConditionGrade(String),
}

/// Risk thresholds a loan must clear before auto-invest touches it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    /// Maximum loan-to-value ratio, percent.
    pub ltv: u32,
    /// Minimum borrower credit score.
    pub credit_score: u32,
    /// Minimum occupancy rate for commercial properties, percent.
    pub occupancy_rate: u32,
    /// Acceptable property condition grades.
    pub property_condition: Vec<String>,
}

/// Saved auto-invest configuration for one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoInvestStrategy {
    pub enabled: bool,
    pub monthly_budget: f64,
    pub min_interest_rate: f64,
    pub max_loan_amount: f64,
    pub diversification_count: u32,
    pub auto_reinvest: bool,
    pub risk_factors: RiskFactors,
}

impl Default for AutoInvestStrategy {
    fn default() -> Self {
        Self {
            enabled: false,
            monthly_budget: 1000.0,
            min_interest_rate: 5.0,
            max_loan_amount: 50_000.0,
            diversification_count: 5,
            auto_reinvest: true,
            risk_factors: RiskFactors {
                ltv: 75,
                credit_score: 680,
                occupancy_rate: 90,
                property_condition: vec!["A".to_string()],
            },
        }
    }
}

impl AutoInvestStrategy {
    pub fn validate(&self) -> Result<(), StrategyError> {
        if !(self.monthly_budget.is_finite() && self.monthly_budget > 0.0) {
            return Err(StrategyError::InvalidBudget(self.monthly_budget));
        }
        if !(0.0..=100.0).contains(&self.min_interest_rate) {
            return Err(StrategyError::InvalidInterestRate(self.min_interest_rate));
        }
        if !(self.max_loan_amount.is_finite() && self.max_loan_amount > 0.0) {
            return Err(StrategyError::InvalidMaxLoanAmount(self.max_loan_amount));
        }
        if self.diversification_count == 0 {
            return Err(StrategyError::InvalidDiversification(
                self.diversification_count,
            ));
        }
        for grade in &self.risk_factors.property_condition {
            if !matches!(grade.as_str(), "A" | "B" | "C") {
                return Err(StrategyError::InvalidConditionGrade(grade.clone()));
            }
        }
        Ok(())
    }
}

/// Per-account strategy store. Accounts without a saved strategy read the
/// defaults.
#[derive(Debug, Default)]
pub struct StrategyStore {
    strategies: DashMap<String, AutoInvestStrategy>,
}

impl StrategyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, account: &str) -> AutoInvestStrategy {
        self.strategies
            .get(account)
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn put(
        &self,
        account: &str,
        strategy: AutoInvestStrategy,
    ) -> Result<AutoInvestStrategy, StrategyError> {
        strategy.validate()?;
        self.strategies.insert(account.to_string(), strategy.clone());
        Ok(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_account_reads_defaults() {
        let store = StrategyStore::new();
        let strategy = store.get("0xabc");
        assert!(!strategy.enabled);
        assert_eq!(strategy.monthly_budget, 1000.0);
        assert_eq!(strategy.risk_factors.property_condition, vec!["A"]);
    }

    #[test]
    fn put_then_get_round_trips() {
        let store = StrategyStore::new();
        let mut strategy = AutoInvestStrategy::default();
        strategy.enabled = true;
        strategy.monthly_budget = 2500.0;
        strategy.risk_factors.property_condition = vec!["A".to_string(), "B".to_string()];

        store.put("0xabc", strategy.clone()).unwrap();
        assert_eq!(store.get("0xabc"), strategy);
        // Other accounts are unaffected.
        assert!(!store.get("0xdef").enabled);
    }

    #[test]
    fn invalid_strategies_are_rejected() {
        let store = StrategyStore::new();

        let mut bad_budget = AutoInvestStrategy::default();
        bad_budget.monthly_budget = 0.0;
        assert!(matches!(
            store.put("0xabc", bad_budget),
            Err(StrategyError::InvalidBudget(_))
        ));

        let mut bad_rate = AutoInvestStrategy::default();
        bad_rate.min_interest_rate = 140.0;
        assert!(matches!(
            store.put("0xabc", bad_rate),
            Err(StrategyError::InvalidInterestRate(_))
        ));

        let mut bad_grade = AutoInvestStrategy::default();
        bad_grade.risk_factors.property_condition = vec!["D".to_string()];
        assert!(matches!(
            store.put("0xabc", bad_grade),
            Err(StrategyError::InvalidConditionGrade(_))
        ));

        // Nothing was stored by the failed puts.
        assert_eq!(store.get("0xabc"), AutoInvestStrategy::default());
    }
}
