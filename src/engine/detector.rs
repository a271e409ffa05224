//! Fraud detection engine: scoring, classification, alerting and statistics
//! for one analysis session.

use crate::config::EngineConfig;
use crate::engine::report::{Report, ReportConfig};
use crate::engine::scorer::{ScoreResult, Scorer};
use crate::engine::statistics::Statistics;
use crate::indicators::Indicator;
use crate::types::alert::{Alert, RiskTier, TierThresholds};
use crate::types::transaction::Transaction;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Per-transaction outcome of [`FraudDetectionEngine::analyze`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub transaction_id: Option<String>,
    pub risk_score: u32,
    pub risk_level: RiskTier,
    pub indicators: Vec<Indicator>,
    /// Alert raised for this transaction, if its tier requires one
    pub alert: Option<Alert>,
}

/// Owns the alert log and statistics of a single session.
///
/// Configuration is fixed at construction. Independent engines never share
/// counters or alert sequences.
pub struct FraudDetectionEngine {
    scorer: Scorer,
    thresholds: TierThresholds,
    report_config: ReportConfig,
    alerts: Vec<Alert>,
    statistics: Statistics,
    /// Sequence number of the last alert raised
    alert_seq: u64,
}

impl FraudDetectionEngine {
    /// Create an engine from validated configuration
    pub fn new(config: &EngineConfig) -> Self {
        info!(
            thresholds = ?config.thresholds,
            max_raw_score = config.weights.total(),
            "Fraud detection engine initialized"
        );

        Self {
            scorer: Scorer::new(config.weights.clone(), config.rules.clone()),
            thresholds: config.thresholds.clone(),
            report_config: config.report.clone(),
            alerts: Vec::new(),
            statistics: Statistics::new(),
            alert_seq: 0,
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    /// Score a transaction without touching session state.
    pub fn score(&self, transaction: &Transaction) -> ScoreResult {
        self.scorer.score(transaction)
    }

    pub fn classify(&self, score: u32) -> RiskTier {
        self.thresholds.classify(score)
    }

    /// Score, classify and record one transaction, raising an alert for
    /// MEDIUM tiers and above.
    pub fn analyze(&mut self, transaction: &Transaction) -> AnalysisResult {
        let ScoreResult { score, indicators } = self.scorer.score(transaction);
        let tier = self.thresholds.classify(score);

        self.statistics.record(tier);

        let alert = if tier.requires_alert() {
            Some(self.raise_alert(transaction, score, tier, indicators.clone()))
        } else {
            None
        };

        debug!(
            transaction_id = ?transaction.transaction_id,
            risk_score = score,
            risk_level = %tier,
            indicators = ?indicators,
            "Transaction analyzed"
        );

        AnalysisResult {
            transaction_id: transaction.transaction_id.clone(),
            risk_score: score,
            risk_level: tier,
            indicators,
            alert,
        }
    }

    /// Analyze a batch in order
    pub fn analyze_batch(&mut self, transactions: &[Transaction]) -> Vec<AnalysisResult> {
        transactions.iter().map(|tx| self.analyze(tx)).collect()
    }

    fn raise_alert(
        &mut self,
        transaction: &Transaction,
        score: u32,
        tier: RiskTier,
        indicators: Vec<Indicator>,
    ) -> Alert {
        self.alert_seq += 1;
        let alert = Alert::new(self.alert_seq, score, tier, indicators)
            .with_transaction_details(transaction);

        info!(
            alert_id = %alert.alert_id,
            transaction_id = ?alert.transaction_id,
            risk_score = score,
            risk_level = %tier,
            "Fraud alert raised"
        );

        self.alerts.push(alert.clone());
        alert
    }

    /// Alerts raised so far, in creation order
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Build a report over the session so far
    pub fn report(&self) -> Report {
        Report::generate(&self.statistics, &self.alerts, &self.report_config)
    }
}

impl Default for FraudDetectionEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
