//! JSON export of session results

use crate::config::OutputConfig;
use crate::engine::detector::AnalysisResult;
use crate::engine::report::Report;
use crate::types::alert::Alert;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes the alert log, report and per-transaction results as standalone
/// JSON documents.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: OutputConfig,
}

/// Paths written by [`Exporter::export_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub alerts: PathBuf,
    pub report: PathBuf,
    pub results: PathBuf,
}

impl Exporter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.dir
    }

    pub fn write_alerts(&self, alerts: &[Alert]) -> Result<PathBuf> {
        self.write_json(&self.config.alerts_file, alerts)
    }

    pub fn write_report(&self, report: &Report) -> Result<PathBuf> {
        self.write_json(&self.config.report_file, report)
    }

    pub fn write_results(&self, results: &[AnalysisResult]) -> Result<PathBuf> {
        self.write_json(&self.config.results_file, results)
    }

    /// Write all three documents once a batch is complete
    pub fn export_all(
        &self,
        alerts: &[Alert],
        report: &Report,
        results: &[AnalysisResult],
    ) -> Result<ExportedFiles> {
        let files = ExportedFiles {
            alerts: self.write_alerts(alerts)?,
            report: self.write_report(report)?,
            results: self.write_results(results)?,
        };

        info!(
            dir = %self.config.dir.display(),
            alerts = alerts.len(),
            results = results.len(),
            "Results exported"
        );
        Ok(files)
    }

    fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.dir).with_context(|| {
            format!("Failed to create output directory {}", self.config.dir.display())
        })?;

        let path = self.config.dir.join(file_name);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(path = %path.display(), "Document written");
        Ok(path)
    }
}
