//! Session report: alert summary, top alerts and advisory recommendations.

use crate::engine::statistics::Statistics;
use crate::types::alert::{Alert, RiskTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Limits used when building a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum number of alerts listed in `top_alerts`
    pub top_alerts_limit: usize,
    /// HIGH recommendation is issued above this many high-risk transactions
    pub high_risk_recommendation_min: u64,
    /// MEDIUM recommendation is issued above this flag rate (percent)
    pub flag_rate_threshold_pct: f64,
    /// Label describing the period the session covers
    pub analysis_period: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_alerts_limit: 10,
            high_risk_recommendation_min: 5,
            flag_rate_threshold_pct: 10.0,
            analysis_period: "24_HOURS".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total_alerts: usize,
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub pending_review: usize,
}

/// Advisory produced from the session statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: RiskTier,
    pub recommendation: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub report_generated: DateTime<Utc>,
    pub analysis_period: String,
    pub statistics: Statistics,
    pub alert_summary: AlertSummary,
    /// Highest-scoring alerts, ties kept in creation order
    pub top_alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
}

impl Report {
    /// Build a report from the current statistics and alert log.
    pub fn generate(statistics: &Statistics, alerts: &[Alert], config: &ReportConfig) -> Self {
        let alert_summary = AlertSummary {
            total_alerts: alerts.len(),
            critical: statistics.critical_alerts,
            high: statistics.high_risk,
            medium: statistics.medium_risk,
            pending_review: alerts.iter().filter(|a| a.is_pending()).count(),
        };

        Self {
            report_generated: Utc::now(),
            analysis_period: config.analysis_period.clone(),
            statistics: statistics.clone(),
            alert_summary,
            top_alerts: top_alerts(alerts, config.top_alerts_limit),
            recommendations: recommendations(statistics, config),
        }
    }
}

/// Alerts ordered by descending score, truncated to `limit`.
pub fn top_alerts(alerts: &[Alert], limit: usize) -> Vec<Alert> {
    let mut ranked = alerts.to_vec();
    // sort_by is stable, so equal scores stay in creation order
    ranked.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    ranked.truncate(limit);
    ranked
}

/// Derive recommendations in fixed priority order; unmet conditions are omitted.
pub fn recommendations(statistics: &Statistics, config: &ReportConfig) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if statistics.critical_alerts > 0 {
        recommendations.push(Recommendation {
            priority: RiskTier::Critical,
            recommendation: format!(
                "Immediate action required: {} critical fraud alerts detected",
                statistics.critical_alerts
            ),
            action: "Review and respond to all CRITICAL alerts within 1 hour".to_string(),
        });
    }

    if statistics.high_risk > config.high_risk_recommendation_min {
        recommendations.push(Recommendation {
            priority: RiskTier::High,
            recommendation: format!(
                "Elevated fraud activity: {} high-risk transactions",
                statistics.high_risk
            ),
            action: "Increase monitoring and consider enhanced authentication".to_string(),
        });
    }

    let flag_rate = statistics.flag_rate_pct();
    if flag_rate > config.flag_rate_threshold_pct {
        recommendations.push(Recommendation {
            priority: RiskTier::Medium,
            recommendation: format!(
                "High flag rate ({:.1}%) - Review fraud detection thresholds",
                flag_rate
            ),
            action: "Analyze false positives and tune detection rules".to_string(),
        });
    }

    recommendations
}
