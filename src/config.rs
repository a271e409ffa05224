//! Configuration management for the fraud risk engine

use crate::engine::report::ReportConfig;
use crate::indicators::{IndicatorWeights, RuleParams};
use crate::types::alert::TierThresholds;
use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Immutable scoring configuration handed to each engine instance
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Indicator weights (0-100 each)
    pub weights: IndicatorWeights,
    /// Inclusive lower bounds of each risk tier
    pub thresholds: TierThresholds,
    /// Parameters of the indicator predicates
    pub rules: RuleParams,
    /// Report limits
    pub report: ReportConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate().context("Invalid indicator weights")?;
        self.thresholds.validate().context("Invalid tier thresholds")?;
        self.rules.validate().context("Invalid rule parameters")?;
        Ok(())
    }
}

/// Synthetic transaction generator configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of transactions per generated batch
    pub count: usize,
    /// Share of generated transactions with a suspicious profile (0.0 - 1.0)
    pub suspicious_rate: f64,
    /// Number of distinct customers
    pub customers: u32,
    /// Fixed RNG seed for reproducible batches
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 50,
            suspicious_rate: 0.3,
            customers: 20,
            seed: None,
        }
    }
}

/// Export destination configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the JSON documents are written to
    pub dir: PathBuf,
    pub alerts_file: String,
    pub report_file: String,
    pub results_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            alerts_file: "fraud_alerts.json".to_string(),
            report_file: "security_report.json".to_string(),
            results_file: "transaction_analysis.json".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        let app_config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        if !(0.0..=1.0).contains(&self.generator.suspicious_rate) {
            anyhow::bail!(
                "generator.suspicious_rate must be within 0.0..=1.0, got {}",
                self.generator.suspicious_rate
            );
        }
        if self.generator.customers == 0 {
            anyhow::bail!("generator.customers must be at least 1");
        }
        match self.logging.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => anyhow::bail!("logging.format must be \"json\" or \"pretty\", got {:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fraud-risk-engine-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.engine.thresholds.low, 30);
        assert_eq!(config.engine.thresholds.critical, 95);
        assert_eq!(config.engine.weights.pattern_match, 30);
        assert_eq!(config.engine.rules.round_minimum, 500.0);
        assert_eq!(config.engine.report.top_alerts_limit, 10);
        assert_eq!(config.generator.count, 50);
        assert_eq!(config.output.alerts_file, "fraud_alerts.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/config.toml");
        let config = AppConfig::load_from_path(&path).unwrap();
        let defaults = AppConfig::default();

        assert_eq!(config.engine.weights, defaults.engine.weights);
        assert_eq!(config.engine.thresholds, defaults.engine.thresholds);
        assert_eq!(config.engine.rules, defaults.engine.rules);
        assert_eq!(config.engine.report, defaults.engine.report);
        assert_eq!(config.generator.count, defaults.generator.count);
        assert_eq!(config.generator.suspicious_rate, defaults.generator.suspicious_rate);
        assert_eq!(config.generator.customers, defaults.generator.customers);
        assert_eq!(config.generator.seed, None);
        assert_eq!(config.output.dir, defaults.output.dir);
        assert_eq!(config.output.alerts_file, defaults.output.alerts_file);
        assert_eq!(config.output.report_file, defaults.output.report_file);
        assert_eq!(config.output.results_file, defaults.output.results_file);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = write_config(
            "partial",
            r#"
[engine.weights]
pattern_match = 40

[engine.thresholds]
critical = 90

[generator]
count = 200
seed = 7
"#,
        );

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.engine.weights.pattern_match, 40);
        assert_eq!(config.engine.weights.velocity, 20);
        assert_eq!(config.engine.thresholds.critical, 90);
        assert_eq!(config.engine.thresholds.high, 80);
        assert_eq!(config.generator.count, 200);
        assert_eq!(config.generator.seed, Some(7));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let path = write_config(
            "invalid",
            r#"
[engine.thresholds]
low = 70
medium = 60
"#,
        );

        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("tier thresholds"));
    }

    #[test]
    fn test_missing_file_without_path_uses_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.engine.thresholds, TierThresholds::default());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
