//! Risk tiers and fraud alert records

use crate::indicators::Indicator;
use crate::types::transaction::Transaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk tier classification, ordered by ascending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Normal,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    /// All tiers, least severe first.
    pub const ALL: [RiskTier; 5] = [
        RiskTier::Normal,
        RiskTier::Low,
        RiskTier::Medium,
        RiskTier::High,
        RiskTier::Critical,
    ];

    /// Numeric severity rank (NORMAL = 0 .. CRITICAL = 4)
    pub fn severity(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Normal => "NORMAL",
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }

    /// Whether this tier counts as a flagged transaction.
    pub fn is_flagged(self) -> bool {
        self != RiskTier::Normal
    }

    /// Whether transactions in this tier raise an alert.
    pub fn requires_alert(self) -> bool {
        self >= RiskTier::Medium
    }

    /// Recommended handling for a transaction in this tier.
    pub fn recommended_action(self) -> &'static str {
        match self {
            RiskTier::Critical => "IMMEDIATE BLOCK - Contact customer and fraud team immediately",
            RiskTier::High => "HOLD FOR REVIEW - Manual investigation required before processing",
            RiskTier::Medium => "ENHANCED MONITORING - Flag for additional verification",
            RiskTier::Low => "STANDARD MONITORING - Log for pattern analysis",
            RiskTier::Normal => "MONITOR",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive lower score bounds for each tier above NORMAL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl TierThresholds {
    /// Classify a score, checking the most severe tier first.
    pub fn classify(&self, score: u32) -> RiskTier {
        if score >= self.critical {
            RiskTier::Critical
        } else if score >= self.high {
            RiskTier::High
        } else if score >= self.medium {
            RiskTier::Medium
        } else if score >= self.low {
            RiskTier::Low
        } else {
            RiskTier::Normal
        }
    }

    /// Check that the bounds partition 0..=100 into five non-empty ranges.
    pub fn validate(&self) -> anyhow::Result<()> {
        let ordered = 0 < self.low
            && self.low < self.medium
            && self.medium < self.high
            && self.high < self.critical;
        if !ordered || self.critical > crate::indicators::MAX_SCORE {
            anyhow::bail!(
                "tier thresholds must satisfy 0 < low < medium < high < critical <= {}, got {:?}",
                crate::indicators::MAX_SCORE,
                self
            );
        }
        Ok(())
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            low: 30,
            medium: 60,
            high: 80,
            critical: 95,
        }
    }
}

/// Review state of an alert.
///
/// The engine only ever creates alerts as `PendingReview`; the other states
/// belong to the downstream review process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    PendingReview,
    UnderReview,
    Resolved,
}

/// Fraud alert raised for a MEDIUM, HIGH or CRITICAL transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Sequential identifier, `ALERT-00001` onwards
    pub alert_id: String,

    /// Alert creation time
    pub timestamp: DateTime<Utc>,

    pub transaction_id: Option<String>,
    pub customer_id: Option<String>,
    pub amount: f64,

    /// Clamped risk score (0-100)
    pub risk_score: u32,

    pub risk_level: RiskTier,

    /// Indicators that fired, in catalog order
    pub indicators: Vec<Indicator>,

    pub recommended_action: String,

    pub status: AlertStatus,
}

impl Alert {
    /// Format the identifier for the `sequence`-th alert of a session.
    pub fn format_id(sequence: u64) -> String {
        format!("ALERT-{:05}", sequence)
    }

    /// Create a pending alert for a scored transaction
    pub fn new(sequence: u64, risk_score: u32, risk_level: RiskTier, indicators: Vec<Indicator>) -> Self {
        Self {
            alert_id: Self::format_id(sequence),
            timestamp: Utc::now(),
            transaction_id: None,
            customer_id: None,
            amount: 0.0,
            risk_score,
            risk_level,
            indicators,
            recommended_action: risk_level.recommended_action().to_string(),
            status: AlertStatus::PendingReview,
        }
    }

    /// Echo the identifying details of the transaction onto the alert
    pub fn with_transaction_details(mut self, transaction: &Transaction) -> Self {
        self.transaction_id = transaction.transaction_id.clone();
        self.customer_id = transaction.customer_id.clone();
        self.amount = transaction.amount;
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == AlertStatus::PendingReview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_score() {
        let thresholds = TierThresholds::default();

        assert_eq!(thresholds.classify(0), RiskTier::Normal);
        assert_eq!(thresholds.classify(29), RiskTier::Normal);
        assert_eq!(thresholds.classify(30), RiskTier::Low);
        assert_eq!(thresholds.classify(59), RiskTier::Low);
        assert_eq!(thresholds.classify(60), RiskTier::Medium);
        assert_eq!(thresholds.classify(79), RiskTier::Medium);
        assert_eq!(thresholds.classify(80), RiskTier::High);
        assert_eq!(thresholds.classify(94), RiskTier::High);
        assert_eq!(thresholds.classify(95), RiskTier::Critical);
        assert_eq!(thresholds.classify(100), RiskTier::Critical);
    }

    #[test]
    fn test_tier_ordering_and_alerting() {
        assert!(RiskTier::Normal < RiskTier::Low);
        assert!(RiskTier::High < RiskTier::Critical);
        assert_eq!(RiskTier::Critical.severity(), 4);

        let alerting: Vec<RiskTier> = RiskTier::ALL
            .into_iter()
            .filter(|tier| tier.requires_alert())
            .collect();
        assert_eq!(alerting, vec![RiskTier::Medium, RiskTier::High, RiskTier::Critical]);
    }

    #[test]
    fn test_recommended_actions() {
        assert!(RiskTier::Critical.recommended_action().starts_with("IMMEDIATE BLOCK"));
        assert!(RiskTier::High.recommended_action().starts_with("HOLD FOR REVIEW"));
        assert!(RiskTier::Medium.recommended_action().starts_with("ENHANCED MONITORING"));
        assert!(RiskTier::Low.recommended_action().starts_with("STANDARD MONITORING"));
        assert_eq!(RiskTier::Normal.recommended_action(), "MONITOR");
    }

    #[test]
    fn test_threshold_validation() {
        assert!(TierThresholds::default().validate().is_ok());

        let overlapping = TierThresholds {
            medium: 30,
            ..TierThresholds::default()
        };
        assert!(overlapping.validate().is_err());

        let out_of_range = TierThresholds {
            critical: 101,
            ..TierThresholds::default()
        };
        assert!(out_of_range.validate().is_err());

        let zero_low = TierThresholds {
            low: 0,
            ..TierThresholds::default()
        };
        assert!(zero_low.validate().is_err());
    }

    #[test]
    fn test_alert_serialization() {
        let tx = Transaction::new("TXN000007", "CUST0003", 10_000.0);
        let alert = Alert::new(
            7,
            95,
            RiskTier::Critical,
            vec![Indicator::HighVelocity, Indicator::AmountSpike],
        )
        .with_transaction_details(&tx);

        assert_eq!(alert.alert_id, "ALERT-00007");
        assert!(alert.is_pending());

        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["risk_level"], "CRITICAL");
        assert_eq!(json["status"], "PENDING_REVIEW");
        assert_eq!(json["indicators"][1], "AMOUNT_SPIKE");
        assert_eq!(json["transaction_id"], "TXN000007");

        let deserialized: Alert = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, alert);
    }
}
