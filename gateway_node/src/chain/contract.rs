//! Generated bindings for the LendingPlatform contract.
//!
//! The ABI below is the canonical surface the gateway consumes; the
//! deployed address arrives through configuration.

use ethers::prelude::abigen;

abigen!(
    LendingPlatform,
    r#"[
        function createLoan(uint256 _amount, uint256 _interestRate, uint256 _duration, string _propertyAddress)
        struct LoanData { uint256 id; address borrower; uint256 amount; uint256 fundedAmount; uint256 interestRate; uint256 duration; bool isActive; bytes32 propertyHash; string propertyAddress; bool isVerified; }
        function getAllLoans() view returns (LoanData[])
        function loans(uint256) view returns (uint256 id, address borrower, uint256 amount, uint256 fundedAmount, uint256 interestRate, uint256 duration, bool isActive, bytes32 propertyHash, string propertyAddress, bool isVerified)
        function invest(uint256 _loanId) payable
        function addProperty(string _propertyAddress)
        function verifyProperty(bytes32 _propertyHash)
        function properties(bytes32) view returns (address owner, bool isVerified, string propertyAddress)
        event LoanCreated(uint256 loanId, address borrower, uint256 amount)
        event InvestmentMade(uint256 loanId, address lender, uint256 amount)
    ]"#
);
