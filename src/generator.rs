//! Synthetic transaction generator for demonstrations and load testing.

use crate::config::GeneratorConfig;
use crate::types::transaction::Transaction;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces batches of transactions with a configurable share of suspicious
/// profiles.
pub struct TransactionGenerator {
    rng: StdRng,
    suspicious_rate: f64,
    customers: u32,
    transaction_counter: u64,
}

impl TransactionGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            suspicious_rate: config.suspicious_rate,
            customers: config.customers.max(1),
            transaction_counter: 0,
        }
    }

    /// Generate `count` transactions
    pub fn generate(&mut self, count: usize) -> Vec<Transaction> {
        (0..count).map(|_| self.next_transaction()).collect()
    }

    /// Generate one transaction, suspicious with the configured probability
    pub fn next_transaction(&mut self) -> Transaction {
        if self.rng.gen_bool(self.suspicious_rate) {
            self.generate_suspicious()
        } else {
            self.generate_legitimate()
        }
    }

    /// Generate an ordinary transaction
    pub fn generate_legitimate(&mut self) -> Transaction {
        let mut tx = self.base_transaction();
        tx.amount = self.rng.gen_range(50..=5000) as f64;
        tx.transactions_last_hour = self.rng.gen_range(0..=2);
        tx.account_age_days = self.rng.gen_range(10..=500);
        tx
    }

    /// Generate a transaction biased toward fraud indicators
    pub fn generate_suspicious(&mut self) -> Transaction {
        let mut tx = self.base_transaction();

        tx.amount = if self.rng.gen_bool(0.5) {
            self.rng.gen_range(5000..=15000) as f64 // Large amount
        } else {
            (self.rng.gen_range(100..=1000) * 10) as f64 // Round amount
        };
        if self.rng.gen_bool(0.4) {
            tx.hour = self.rng.gen_range(2..=5); // Night time
        }
        tx.transactions_last_hour = self.rng.gen_range(0..=6);
        tx.location_changed = self.rng.gen_bool(0.3);
        tx.new_payee = self.rng.gen_bool(0.5);
        tx.account_age_days = self.rng.gen_range(5..=45);
        tx.pattern_match = self.rng.gen_bool(0.4);
        tx
    }

    fn base_transaction(&mut self) -> Transaction {
        self.transaction_counter += 1;
        let customer = self.rng.gen_range(1..=self.customers);
        let timestamp = Utc::now() - Duration::hours(self.rng.gen_range(0..=24));

        Transaction {
            transaction_id: Some(format!("TXN{:06}", self.transaction_counter)),
            customer_id: Some(format!("CUST{:04}", customer)),
            timestamp: Some(timestamp),
            hour: self.rng.gen_range(0..=23),
            avg_transaction_amount: self.rng.gen_range(200..=800) as f64,
            ..Transaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64, suspicious_rate: f64) -> TransactionGenerator {
        TransactionGenerator::new(&GeneratorConfig {
            count: 0,
            suspicious_rate,
            customers: 20,
            seed: Some(seed),
        })
    }

    #[test]
    fn test_identifiers() {
        let batch = seeded(1, 0.3).generate(3);
        let ids: Vec<_> = batch.iter().map(|t| t.transaction_id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["TXN000001", "TXN000002", "TXN000003"]);

        for tx in &batch {
            let customer = tx.customer_id.as_deref().unwrap();
            let number: u32 = customer.trim_start_matches("CUST").parse().unwrap();
            assert!((1..=20).contains(&number));
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = seeded(42, 0.3).generate(20);
        let b = seeded(42, 0.3).generate(20);
        let strip = |batch: Vec<Transaction>| -> Vec<(f64, u8, u32)> {
            batch
                .into_iter()
                .map(|t| (t.amount, t.hour, t.transactions_last_hour))
                .collect()
        };
        assert_eq!(strip(a), strip(b));
    }

    #[test]
    fn test_legitimate_profile() {
        let mut generator = seeded(7, 0.0);
        for tx in generator.generate(200) {
            assert!((50.0..=5000.0).contains(&tx.amount));
            assert!(tx.transactions_last_hour <= 2);
            assert!(!tx.location_changed && !tx.new_payee && !tx.pattern_match);
            assert!(tx.hour <= 23);
        }
    }

    #[test]
    fn test_suspicious_profile() {
        let mut generator = seeded(7, 1.0);
        let batch = generator.generate(200);
        for tx in &batch {
            assert!(tx.amount >= 1000.0);
            assert!((5..=45).contains(&tx.account_age_days));
        }
        assert!(batch.iter().any(|t| t.pattern_match));
        assert!(batch.iter().any(|t| (2..=5).contains(&t.hour)));
    }
}
