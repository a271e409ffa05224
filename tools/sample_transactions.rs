//! Sample Transaction Writer
//!
//! Generates synthetic transactions and writes them as newline-delimited JSON,
//! ready to be fed back into `fraud-risk-engine --input`.

use anyhow::{Context, Result};
use clap::Parser;
use fraud_risk_engine::config::GeneratorConfig;
use fraud_risk_engine::generator::TransactionGenerator;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "sample-transactions", about = "Write synthetic transactions as NDJSON")]
struct Args {
    /// Number of transactions
    #[arg(short = 'n', long, default_value_t = 100)]
    count: usize,

    /// Share of suspicious transactions (0.0 - 1.0)
    #[arg(long, default_value_t = 0.3)]
    suspicious_rate: f64,

    /// Number of distinct customers
    #[arg(long, default_value_t = 20)]
    customers: u32,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sample_transactions=info".parse()?),
        )
        .init();

    let args = Args::parse();
    if !(0.0..=1.0).contains(&args.suspicious_rate) {
        anyhow::bail!("--suspicious-rate must be within 0.0..=1.0");
    }

    let mut generator = TransactionGenerator::new(&GeneratorConfig {
        count: args.count,
        suspicious_rate: args.suspicious_rate,
        customers: args.customers,
        seed: args.seed,
    });

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for transaction in generator.generate(args.count) {
        serde_json::to_writer(&mut writer, &transaction)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    info!(
        count = args.count,
        suspicious_rate = args.suspicious_rate,
        seed = ?args.seed,
        "Sample transactions written"
    );
    Ok(())
}
