//! Risk scoring, classification and reporting

pub mod detector;
pub mod report;
pub mod scorer;
pub mod statistics;

pub use detector::{AnalysisResult, FraudDetectionEngine};
pub use report::{Recommendation, Report, ReportConfig};
pub use scorer::{ScoreResult, Scorer};
pub use statistics::Statistics;
