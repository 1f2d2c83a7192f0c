//! Display-side mirrors of on-chain state.

use ethers::types::{Address, U256};
use ethers::utils::{format_ether, to_checksum};
use serde::Serialize;

/// On-chain loan tuple as returned by `loans(id)` and `getAllLoans()`.
pub type LoanTuple = (
    U256,
    Address,
    U256,
    U256,
    U256,
    U256,
    bool,
    [u8; 32],
    String,
    bool,
);

/// A loan as the contract stores it. Amounts are wei.
#[derive(Debug, Clone)]
pub struct Loan {
    pub id: U256,
    pub borrower: Address,
    pub amount: U256,
    pub funded_amount: U256,
    pub interest_rate: U256,
    pub duration: U256,
    pub is_active: bool,
    pub property_hash: [u8; 32],
    pub property_address: String,
    pub is_verified: bool,
}

impl From<LoanTuple> for Loan {
    fn from(t: LoanTuple) -> Self {
        Self {
            id: t.0,
            borrower: t.1,
            amount: t.2,
            funded_amount: t.3,
            interest_rate: t.4,
            duration: t.5,
            is_active: t.6,
            property_hash: t.7,
            property_address: t.8,
            is_verified: t.9,
        }
    }
}

/// Why an investment cannot be submitted against a loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvestmentRejection {
    /// The loan is closed to new funding.
    Inactive,
    /// The requested amount exceeds what is still unfunded.
    ExceedsRemaining { remaining: U256 },
}

impl Loan {
    /// Wei still needed to fully fund the loan. The contract guarantees
    /// `funded_amount <= amount`; saturate anyway rather than panic on a
    /// misbehaving deployment.
    pub fn remaining_capacity(&self) -> U256 {
        self.amount.saturating_sub(self.funded_amount)
    }

    /// Pre-flight check mirroring the contract's own funding rules, so the
    /// gateway can reject doomed transactions before paying gas.
    pub fn accepts_investment(&self, amount: U256) -> Result<(), InvestmentRejection> {
        if !self.is_active {
            return Err(InvestmentRejection::Inactive);
        }
        let remaining = self.remaining_capacity();
        if amount > remaining {
            return Err(InvestmentRejection::ExceedsRemaining { remaining });
        }
        Ok(())
    }
}

/// JSON shape the dashboard consumes: string ids, ether decimal strings,
/// hex property hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub id: String,
    pub borrower: String,
    pub amount: String,
    pub funded_amount: String,
    pub interest_rate: String,
    pub duration: String,
    pub is_active: bool,
    pub property_hash: String,
    pub property_address: String,
    pub is_verified: bool,
}

impl From<&Loan> for LoanRecord {
    fn from(loan: &Loan) -> Self {
        Self {
            id: loan.id.to_string(),
            borrower: to_checksum(&loan.borrower, None),
            amount: format_ether(loan.amount),
            funded_amount: format_ether(loan.funded_amount),
            interest_rate: loan.interest_rate.to_string(),
            duration: loan.duration.to_string(),
            is_active: loan.is_active,
            property_hash: format!("0x{}", hex::encode(loan.property_hash)),
            property_address: loan.property_address.clone(),
            is_verified: loan.is_verified,
        }
    }
}

/// On-chain property mirror keyed by keccak256 of the address string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub owner: String,
    pub is_verified: bool,
    pub property_address: String,
}

impl From<(Address, bool, String)> for PropertyRecord {
    fn from(t: (Address, bool, String)) -> Self {
        Self {
            owner: to_checksum(&t.0, None),
            is_verified: t.1,
            property_address: t.2,
        }
    }
}

impl PropertyRecord {
    /// An all-zero owner means the mapping slot was never written.
    pub fn is_registered(&self) -> bool {
        self.owner != to_checksum(&Address::zero(), None)
    }
}

/// Built-in sample listings served only when the operator explicitly
/// enables the fallback branch and the chain is unreachable.
pub fn fallback_loans() -> Vec<LoanRecord> {
    vec![
        LoanRecord {
            id: "1".to_string(),
            borrower: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            amount: "2.500000000000000000".to_string(),
            funded_amount: "1.000000000000000000".to_string(),
            interest_rate: "7".to_string(),
            duration: "12".to_string(),
            is_active: true,
            property_hash: "0x5c7f1f5b8a0f3a4f9f4d8a2e6b1c9d0e7a3b5c8d2f4e6a8b0c2d4e6f8a0b1c2d"
                .to_string(),
            property_address: "123 Main Street, Portland".to_string(),
            is_verified: true,
        },
        LoanRecord {
            id: "2".to_string(),
            borrower: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
            amount: "4.000000000000000000".to_string(),
            funded_amount: "4.000000000000000000".to_string(),
            interest_rate: "5".to_string(),
            duration: "24".to_string(),
            is_active: false,
            property_hash: "0x1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f809"
                .to_string(),
            property_address: "456 Oak Avenue, Austin".to_string(),
            is_verified: true,
        },
        LoanRecord {
            id: "3".to_string(),
            borrower: "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC".to_string(),
            amount: "1.250000000000000000".to_string(),
            funded_amount: "0.000000000000000000".to_string(),
            interest_rate: "9".to_string(),
            duration: "6".to_string(),
            is_active: true,
            property_hash: "0x9e8d7c6b5a49382716a5b4c3d2e1f0998d7c6b5a49382716a5b4c3d2e1f0998d"
                .to_string(),
            property_address: "789 Pine Lane, Denver".to_string(),
            is_verified: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::utils::parse_ether;

    fn sample_loan(amount_eth: &str, funded_eth: &str, active: bool) -> Loan {
        Loan {
            id: U256::from(1),
            borrower: Address::random(),
            amount: parse_ether(amount_eth).unwrap(),
            funded_amount: parse_ether(funded_eth).unwrap(),
            interest_rate: U256::from(5),
            duration: U256::from(12),
            is_active: active,
            property_hash: [0u8; 32],
            property_address: "123 Test Street".to_string(),
            is_verified: true,
        }
    }

    #[test]
    fn over_capacity_investment_is_rejected_with_remaining() {
        let loan = sample_loan("2.0", "1.5", true);
        let remaining = parse_ether("0.5").unwrap();
        assert_eq!(loan.remaining_capacity(), remaining);

        match loan.accepts_investment(parse_ether("0.6").unwrap()) {
            Err(InvestmentRejection::ExceedsRemaining { remaining: r }) => {
                assert_eq!(r, remaining)
            }
            other => panic!("expected ExceedsRemaining, got {other:?}"),
        }

        // Exactly the remaining amount is fine.
        assert!(loan
            .accepts_investment(parse_ether("0.5").unwrap())
            .is_ok());
    }

    #[test]
    fn inactive_loan_rejects_any_amount() {
        let loan = sample_loan("2.0", "0.0", false);
        assert_eq!(
            loan.accepts_investment(U256::one()),
            Err(InvestmentRejection::Inactive)
        );
        assert_eq!(
            loan.accepts_investment(U256::zero()),
            Err(InvestmentRejection::Inactive)
        );
    }

    #[test]
    fn record_mapping_formats_amounts_and_hash() {
        let loan = sample_loan("1.0", "0.25", true);
        let record = LoanRecord::from(&loan);
        assert_eq!(record.id, "1");
        assert_eq!(record.amount, "1.000000000000000000");
        assert_eq!(record.funded_amount, "0.250000000000000000");
        assert!(record.property_hash.starts_with("0x"));
        assert_eq!(record.property_hash.len(), 66);
        assert!(record.borrower.starts_with("0x"));
    }

    #[test]
    fn fallback_set_is_marked_and_plausible() {
        let loans = fallback_loans();
        assert_eq!(loans.len(), 3);
        // Funded never exceeds requested in the sample data.
        for loan in &loans {
            let amount: f64 = loan.amount.parse().unwrap();
            let funded: f64 = loan.funded_amount.parse().unwrap();
            assert!(funded <= amount);
        }
    }
}
