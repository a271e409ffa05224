//! Running statistics over every transaction an engine has analyzed.

use crate::types::alert::RiskTier;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Per-session counters.
///
/// `flagged_transactions` always equals the sum of the four tier counters,
/// and never exceeds `total_transactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_transactions: u64,
    pub flagged_transactions: u64,
    pub critical_alerts: u64,
    pub high_risk: u64,
    pub medium_risk: u64,
    pub low_risk: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one classified transaction
    pub fn record(&mut self, tier: RiskTier) {
        self.total_transactions += 1;

        let counter = match tier {
            RiskTier::Normal => return,
            RiskTier::Low => &mut self.low_risk,
            RiskTier::Medium => &mut self.medium_risk,
            RiskTier::High => &mut self.high_risk,
            RiskTier::Critical => &mut self.critical_alerts,
        };
        *counter += 1;
        self.flagged_transactions += 1;
    }

    /// Number of transactions classified into `tier`.
    pub fn count(&self, tier: RiskTier) -> u64 {
        match tier {
            RiskTier::Normal => self.total_transactions - self.flagged_transactions,
            RiskTier::Low => self.low_risk,
            RiskTier::Medium => self.medium_risk,
            RiskTier::High => self.high_risk,
            RiskTier::Critical => self.critical_alerts,
        }
    }

    /// Percentage of analyzed transactions that were flagged; 0 when nothing
    /// has been analyzed yet.
    pub fn flag_rate_pct(&self) -> f64 {
        if self.total_transactions == 0 {
            return 0.0;
        }
        self.flagged_transactions as f64 * 100.0 / self.total_transactions as f64
    }

    /// Check the counter invariants.
    pub fn is_consistent(&self) -> bool {
        let by_tier = self.critical_alerts + self.high_risk + self.medium_risk + self.low_risk;
        self.flagged_transactions == by_tier && self.total_transactions >= self.flagged_transactions
    }

    /// Rows of the session summary box, each padded to the same width
    pub fn summary_lines(&self) -> Vec<String> {
        const RULE: &str = "══════════════════════════════════════════════════════════════";
        let row = |text: String| format!("║ {:<60} ║", text);

        let mut lines = vec![
            format!("╔{}╗", RULE),
            row(format!("{:^60}", "FRAUD RISK ENGINE - SESSION SUMMARY")),
            format!("╠{}╣", RULE),
            row(format!(
                "Transactions Analyzed: {:>8}  │  Flagged: {:>8}",
                self.total_transactions, self.flagged_transactions
            )),
            row(format!("Flag Rate: {:>6.1}%", self.flag_rate_pct())),
            format!("╠{}╣", RULE),
            row("Transactions by Risk Tier:".to_string()),
        ];
        for tier in RiskTier::ALL.into_iter().rev() {
            let count = self.count(tier);
            let pct = if self.total_transactions > 0 {
                (count as f64 / self.total_transactions as f64) * 100.0
            } else {
                0.0
            };
            let bar: String = "█".repeat(((pct / 5.0) as usize).min(20));
            lines.push(row(format!(
                "  {:10}: {:>6} ({:>5.1}%) {}",
                tier.as_str(),
                count,
                pct,
                bar
            )));
        }
        lines.push(format!("╚{}╝", RULE));
        lines
    }

    /// Log the session breakdown
    pub fn log_summary(&self) {
        for line in self.summary_lines() {
            info!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tiers() {
        let mut stats = Statistics::new();
        for tier in [
            RiskTier::Normal,
            RiskTier::Normal,
            RiskTier::Low,
            RiskTier::Medium,
            RiskTier::High,
            RiskTier::Critical,
            RiskTier::Critical,
        ] {
            stats.record(tier);
        }

        assert_eq!(stats.total_transactions, 7);
        assert_eq!(stats.flagged_transactions, 5);
        assert_eq!(stats.critical_alerts, 2);
        assert_eq!(stats.count(RiskTier::Normal), 2);
        assert_eq!(stats.count(RiskTier::Low), 1);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_flag_rate() {
        let mut stats = Statistics::new();
        assert_eq!(stats.flag_rate_pct(), 0.0);

        stats.record(RiskTier::Low);
        for _ in 0..9 {
            stats.record(RiskTier::Normal);
        }
        assert_eq!(stats.flag_rate_pct(), 10.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut stats = Statistics::new();
        stats.record(RiskTier::High);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_transactions"], 1);
        assert_eq!(json["flagged_transactions"], 1);
        assert_eq!(json["high_risk"], 1);
        assert_eq!(json["critical_alerts"], 0);
    }

    #[test]
    fn test_summary_box_rows_align() {
        let mut stats = Statistics::new();
        for tier in [RiskTier::Normal, RiskTier::Critical, RiskTier::Critical, RiskTier::Low] {
            stats.record(tier);
        }

        let lines = stats.summary_lines();
        let width = lines[0].chars().count();
        assert_eq!(width, 64);
        for line in &lines {
            assert_eq!(line.chars().count(), width, "ragged row: {line}");
        }
        assert!(lines[1..lines.len() - 1]
            .iter()
            .all(|l| l.ends_with('║') || l.ends_with('╣')));
        assert!(lines.iter().any(|l| l.contains("CRITICAL") && l.contains("50.0%")));
    }
}
