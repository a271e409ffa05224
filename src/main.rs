//! Fraud Risk Engine - Main Entry Point
//!
//! Analyzes a batch of transactions (from a file or the synthetic generator),
//! logs flagged activity and a session summary, and exports the results.

use anyhow::Result;
use clap::Parser;
use fraud_risk_engine::{
    config::AppConfig, exporter::Exporter, generator::TransactionGenerator, source,
    FraudDetectionEngine, RiskTier,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "fraud-risk-engine", version, about = "Heuristic transaction fraud scoring")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transaction file (JSON array, or .jsonl / .ndjson); generated when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of transactions to generate
    #[arg(long)]
    count: Option<usize>,

    /// Seed for the transaction generator
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for exported JSON documents
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip writing output documents
    #[arg(long)]
    no_export: bool,
}

fn init_logging(level: &str, format: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("fraud_risk_engine={}", level).parse()?);

    if format == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(count) = cli.count {
        config.generator.count = count;
    }
    if cli.seed.is_some() {
        config.generator.seed = cli.seed;
    }
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }

    init_logging(&config.logging.level, &config.logging.format)?;

    info!("Starting Fraud Risk Engine");
    let thresholds = &config.engine.thresholds;
    info!(
        "Risk thresholds: LOW>={}, MEDIUM>={}, HIGH>={}, CRITICAL>={}",
        thresholds.low, thresholds.medium, thresholds.high, thresholds.critical
    );

    let transactions = match &cli.input {
        Some(path) => source::load_transactions(path)?,
        None => {
            let mut generator = TransactionGenerator::new(&config.generator);
            let batch = generator.generate(config.generator.count);
            info!(
                count = batch.len(),
                suspicious_rate = config.generator.suspicious_rate,
                seed = ?config.generator.seed,
                "Generated sample transactions"
            );
            batch
        }
    };

    let mut engine = FraudDetectionEngine::new(&config.engine);
    let mut results = Vec::with_capacity(transactions.len());

    for transaction in &transactions {
        let result = engine.analyze(transaction);

        if result.risk_level >= RiskTier::High {
            warn!(
                transaction_id = ?result.transaction_id,
                risk_score = result.risk_score,
                risk_level = %result.risk_level,
                indicators = ?result.indicators,
                alert_id = result.alert.as_ref().map(|a| a.alert_id.as_str()),
                action = result.alert.as_ref().map(|a| a.recommended_action.as_str()),
                "{} RISK DETECTED",
                result.risk_level
            );
        }
        results.push(result);
    }

    info!("Analysis complete");
    engine.statistics().log_summary();

    let report = engine.report();
    for rec in &report.recommendations {
        info!(priority = %rec.priority, action = %rec.action, "{}", rec.recommendation);
    }

    if cli.no_export {
        info!("Export skipped");
    } else {
        let exporter = Exporter::new(config.output.clone());
        let files = exporter.export_all(engine.alerts(), &report, &results)?;
        info!(path = %files.alerts.display(), "Alerts exported");
        info!(path = %files.report.display(), "Report exported");
        info!(path = %files.results.display(), "Transaction analysis exported");
    }

    Ok(())
}
