//! Transaction input from JSON files

use crate::types::transaction::Transaction;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load transactions from `path`.
///
/// `.jsonl` / `.ndjson` files are read one record per line. Anything else must
/// be a JSON array. In both forms a record that fails to deserialize is
/// skipped with a warning.
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transactions from {}", path.display()))?;

    let transactions = if is_line_delimited(path) {
        parse_lines(&contents)
    } else {
        parse_array(&contents)
            .with_context(|| format!("Failed to parse transactions in {}", path.display()))?
    };

    info!(
        path = %path.display(),
        count = transactions.len(),
        "Transactions loaded"
    );
    Ok(transactions)
}

fn is_line_delimited(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("jsonl") | Some("ndjson")
    )
}

/// Parse newline-delimited JSON, skipping blank and malformed lines
pub fn parse_lines(contents: &str) -> Vec<Transaction> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str(line) {
            Ok(transaction) => Some(transaction),
            Err(e) => {
                warn!(line = index + 1, error = %e, "Failed to deserialize transaction");
                None
            }
        })
        .collect()
}

/// Parse a JSON array, skipping elements that are not valid transactions.
///
/// Fails only when the document itself is not a JSON array.
pub fn parse_array(contents: &str) -> Result<Vec<Transaction>> {
    let records: Vec<Value> = serde_json::from_str(contents)?;

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(transaction) => Some(transaction),
            Err(e) => {
                warn!(record = index, error = %e, "Failed to deserialize transaction");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_skips_bad_records() {
        let input = r#"{"transaction_id": "TXN000001", "amount": 100.0}

not json
{"transaction_id": "TXN000002", "hour": 3}
"#;
        let transactions = parse_lines(input);
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].hour, 3);
        assert_eq!(transactions[1].amount, 0.0);
    }

    #[test]
    fn test_parse_array_skips_bad_elements() {
        let input = r#"[
            {"transaction_id": "TXN000001", "amount": 1200.0},
            {"transaction_id": "TXN000002", "hour": "late"},
            42,
            {"transaction_id": "TXN000003", "amount": null, "hour": null}
        ]"#;
        let transactions = parse_array(input).unwrap();

        let ids: Vec<_> = transactions
            .iter()
            .map(|t| t.transaction_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["TXN000001", "TXN000003"]);
        assert_eq!(transactions[1].amount, 0.0);
        assert_eq!(transactions[1].hour, 12);
    }

    #[test]
    fn test_parse_array_rejects_non_array_document() {
        assert!(parse_array(r#"{"transaction_id": "TXN000001"}"#).is_err());
    }

    #[test]
    fn test_load_json_array_and_lines() {
        let dir = std::env::temp_dir().join(format!("fraud-risk-engine-source-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let array = dir.join("batch.json");
        fs::write(&array, r#"[{"transaction_id": "A", "amount": 900.0}, {}]"#).unwrap();
        let loaded = load_transactions(&array).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].transaction_id.as_deref(), Some("A"));
        assert_eq!(loaded[1].account_age_days, 365);

        let lines = dir.join("batch.jsonl");
        fs::write(&lines, "{\"amount\": 1.0}\n{\"amount\": 2.0}\n").unwrap();
        assert_eq!(load_transactions(&lines).unwrap().len(), 2);

        let broken = dir.join("broken.json");
        fs::write(&broken, "[{").unwrap();
        assert!(load_transactions(&broken).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_transactions("/nonexistent/transactions.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/transactions.json"));
    }
}
