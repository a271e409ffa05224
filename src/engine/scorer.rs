//! Weighted-sum risk scoring over the indicator catalog

use crate::indicators::{Indicator, IndicatorWeights, RuleParams, MAX_SCORE};
use crate::types::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Outcome of scoring one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Clamped score (0-100)
    pub score: u32,
    /// Indicators that fired, in catalog order
    pub indicators: Vec<Indicator>,
}

/// Scores transactions against a fixed weight table.
///
/// Stateless: every call depends only on the transaction and the
/// configuration captured at construction.
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: IndicatorWeights,
    rules: RuleParams,
}

impl Scorer {
    pub fn new(weights: IndicatorWeights, rules: RuleParams) -> Self {
        Self { weights, rules }
    }

    pub fn weights(&self) -> &IndicatorWeights {
        &self.weights
    }

    pub fn rules(&self) -> &RuleParams {
        &self.rules
    }

    /// Evaluate every indicator independently and sum the weights of those
    /// that fire, clamped to [`MAX_SCORE`].
    pub fn score(&self, transaction: &Transaction) -> ScoreResult {
        let indicators: Vec<Indicator> = Indicator::ALL
            .into_iter()
            .filter(|&indicator| self.rules.triggers(indicator, transaction))
            .collect();

        let raw: u32 = indicators.iter().map(|&i| self.weights.weight(i)).sum();

        ScoreResult {
            score: raw.min(MAX_SCORE),
            indicators,
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(IndicatorWeights::default(), RuleParams::default())
    }
}
