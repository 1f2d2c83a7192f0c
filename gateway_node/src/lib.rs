//! EstateChain gateway: HTTP API in front of the externally deployed
//! LendingPlatform contract, plus the local portfolio bookkeeping used by
//! the dashboard.

pub mod api;
pub mod chain;
pub mod config;
pub mod strategy;
pub mod utils;
pub mod wallet;
