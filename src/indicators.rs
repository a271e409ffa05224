//! Fraud indicator catalog.
//!
//! Each indicator is a boolean predicate over a single transaction. The
//! catalog pairs every indicator with a static weight; the parameters the
//! predicates compare against live in [`RuleParams`].

use crate::types::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the risk score scale.
pub const MAX_SCORE: u32 = 100;

/// Heuristic fraud indicators, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Indicator {
    /// Burst of payments in the preceding hour
    HighVelocity,
    /// Amount far above the customer's historical average
    AmountSpike,
    /// Payment in the small hours
    TimeAnomaly,
    /// Location differs from the previous payment
    LocationChange,
    /// First payment to the payee
    NewPayee,
    /// Large, suspiciously round amount
    RoundAmount,
    /// Large payment from a young account
    NewAccountRisk,
    /// Flagged by an upstream pattern matcher
    PatternMatch,
}

impl Indicator {
    pub const ALL: [Indicator; 8] = [
        Indicator::HighVelocity,
        Indicator::AmountSpike,
        Indicator::TimeAnomaly,
        Indicator::LocationChange,
        Indicator::NewPayee,
        Indicator::RoundAmount,
        Indicator::NewAccountRisk,
        Indicator::PatternMatch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Indicator::HighVelocity => "HIGH_VELOCITY",
            Indicator::AmountSpike => "AMOUNT_SPIKE",
            Indicator::TimeAnomaly => "TIME_ANOMALY",
            Indicator::LocationChange => "LOCATION_CHANGE",
            Indicator::NewPayee => "NEW_PAYEE",
            Indicator::RoundAmount => "ROUND_AMOUNT",
            Indicator::NewAccountRisk => "NEW_ACCOUNT_RISK",
            Indicator::PatternMatch => "PATTERN_MATCH",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weight contributed by each indicator when it fires (0-100 scale).
///
/// The weights may sum past [`MAX_SCORE`]; the scorer clamps the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorWeights {
    pub velocity: u32,
    pub amount_spike: u32,
    pub time_anomaly: u32,
    pub location_change: u32,
    pub new_payee: u32,
    pub round_amount: u32,
    pub account_age: u32,
    pub pattern_match: u32,
}

impl IndicatorWeights {
    pub fn weight(&self, indicator: Indicator) -> u32 {
        match indicator {
            Indicator::HighVelocity => self.velocity,
            Indicator::AmountSpike => self.amount_spike,
            Indicator::TimeAnomaly => self.time_anomaly,
            Indicator::LocationChange => self.location_change,
            Indicator::NewPayee => self.new_payee,
            Indicator::RoundAmount => self.round_amount,
            Indicator::NewAccountRisk => self.account_age,
            Indicator::PatternMatch => self.pattern_match,
        }
    }

    /// Sum of all weights, before clamping.
    pub fn total(&self) -> u32 {
        Indicator::ALL.iter().map(|&i| self.weight(i)).sum()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for indicator in Indicator::ALL {
            let weight = self.weight(indicator);
            if weight > MAX_SCORE {
                anyhow::bail!(
                    "weight for {} is {}, must be within 0..={}",
                    indicator,
                    weight,
                    MAX_SCORE
                );
            }
        }
        Ok(())
    }
}

impl Default for IndicatorWeights {
    fn default() -> Self {
        Self {
            velocity: 20,
            amount_spike: 25,
            time_anomaly: 15,
            location_change: 20,
            new_payee: 10,
            round_amount: 5,
            account_age: 15,
            pattern_match: 30,
        }
    }
}

/// Limits the indicator predicates compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleParams {
    /// HIGH_VELOCITY fires above this many payments in the last hour
    pub velocity_limit: u32,
    /// AMOUNT_SPIKE fires above this multiple of the historical average
    pub spike_multiplier: f64,
    /// First hour of the TIME_ANOMALY window (inclusive)
    pub anomaly_start_hour: u8,
    /// Last hour of the TIME_ANOMALY window (inclusive)
    pub anomaly_end_hour: u8,
    /// ROUND_AMOUNT requires the amount to be a multiple of this
    pub round_unit: f64,
    /// ROUND_AMOUNT requires at least this amount
    pub round_minimum: f64,
    /// NEW_ACCOUNT_RISK applies to accounts younger than this
    pub new_account_max_age_days: u32,
    /// NEW_ACCOUNT_RISK requires more than this amount
    pub new_account_min_amount: f64,
}

impl RuleParams {
    /// Evaluate a single indicator against a transaction.
    pub fn triggers(&self, indicator: Indicator, tx: &Transaction) -> bool {
        match indicator {
            Indicator::HighVelocity => tx.transactions_last_hour > self.velocity_limit,
            Indicator::AmountSpike => {
                tx.avg_transaction_amount > 0.0
                    && tx.amount > tx.avg_transaction_amount * self.spike_multiplier
            }
            Indicator::TimeAnomaly => {
                (self.anomaly_start_hour..=self.anomaly_end_hour).contains(&tx.hour)
            }
            Indicator::LocationChange => tx.location_changed,
            Indicator::NewPayee => tx.new_payee,
            Indicator::RoundAmount => {
                tx.amount > 0.0
                    && tx.amount % self.round_unit == 0.0
                    && tx.amount >= self.round_minimum
            }
            Indicator::NewAccountRisk => {
                tx.account_age_days < self.new_account_max_age_days
                    && tx.amount > self.new_account_min_amount
            }
            Indicator::PatternMatch => tx.pattern_match,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.anomaly_start_hour > self.anomaly_end_hour || self.anomaly_end_hour > 23 {
            anyhow::bail!(
                "anomaly window {}..={} must be ordered and within 0..=23",
                self.anomaly_start_hour,
                self.anomaly_end_hour
            );
        }
        if self.spike_multiplier.is_nan() || self.spike_multiplier <= 0.0 {
            anyhow::bail!("spike_multiplier must be positive, got {}", self.spike_multiplier);
        }
        if self.round_unit.is_nan() || self.round_unit <= 0.0 {
            anyhow::bail!("round_unit must be positive, got {}", self.round_unit);
        }
        Ok(())
    }
}

impl Default for RuleParams {
    fn default() -> Self {
        Self {
            velocity_limit: 3,
            spike_multiplier: 3.0,
            anomaly_start_hour: 2,
            anomaly_end_hour: 5,
            round_unit: 100.0,
            round_minimum: 500.0,
            new_account_max_age_days: 30,
            new_account_min_amount: 1000.0,
        }
    }
}
