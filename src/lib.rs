//! Fraud Risk Engine Library
//!
//! Scores payment transactions against a fixed set of weighted heuristic
//! indicators, classifies them into risk tiers, raises alerts for the tiers
//! that need attention and summarizes each session in a report.

pub mod config;
pub mod engine;
pub mod exporter;
pub mod generator;
pub mod indicators;
pub mod source;
pub mod types;

pub use config::{AppConfig, EngineConfig};
pub use engine::{AnalysisResult, FraudDetectionEngine, Report, ScoreResult, Scorer, Statistics};
pub use exporter::Exporter;
pub use generator::TransactionGenerator;
pub use indicators::{Indicator, IndicatorWeights, RuleParams};
pub use types::{alert::Alert, alert::RiskTier, transaction::Transaction};
