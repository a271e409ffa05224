//! Type definitions for the fraud risk engine

pub mod alert;
pub mod transaction;

pub use alert::{Alert, AlertStatus, RiskTier, TierThresholds};
pub use transaction::Transaction;
