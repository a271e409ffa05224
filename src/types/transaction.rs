//! Transaction records fed into the risk engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Hour assumed when a record carries none (midday is outside every anomaly window).
pub const DEFAULT_HOUR: u8 = 12;

/// Account age assumed when a record carries none (an established account).
pub const DEFAULT_ACCOUNT_AGE_DAYS: u32 = 365;

fn default_hour() -> u8 {
    DEFAULT_HOUR
}

fn default_account_age_days() -> u32 {
    DEFAULT_ACCOUNT_AGE_DAYS
}

/// Read `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a non-negative whole number written either as an integer or as an
/// integral float (`3.0`). `null`, fractions and negatives yield `None`.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
        .map(|v| v as u64))
}

fn lenient_hour<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    Ok(whole_number(deserializer)?
        .and_then(|v| u8::try_from(v).ok())
        .unwrap_or(DEFAULT_HOUR))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(whole_number(deserializer)?
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0))
}

fn lenient_account_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(whole_number(deserializer)?
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(DEFAULT_ACCOUNT_AGE_DAYS))
}

/// A single payment to be scored.
///
/// Every field may be missing or `null` in the serialized form, and counters
/// may be written as integral floats. Such values fall back to neutral
/// defaults so that partial records score low instead of failing to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    #[serde(default)]
    pub transaction_id: Option<String>,

    /// Customer that initiated the payment
    #[serde(default)]
    pub customer_id: Option<String>,

    /// Payment amount (non-negative)
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,

    /// When the payment happened, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Hour of day (0-23)
    #[serde(default = "default_hour", alias = "hour_of_day", deserialize_with = "lenient_hour")]
    pub hour: u8,

    /// Payments by the same customer during the preceding hour
    #[serde(default, alias = "tx_count_last_hour", deserialize_with = "lenient_count")]
    pub transactions_last_hour: u32,

    /// Historical average payment amount for the customer
    #[serde(default, alias = "avg_tx_amount", deserialize_with = "null_as_default")]
    pub avg_transaction_amount: f64,

    /// Location (IP / geography) differs from the previous payment
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_changed: bool,

    /// First payment to this payee
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_payee: bool,

    /// Age of the paying account in days
    #[serde(default = "default_account_age_days", deserialize_with = "lenient_account_age")]
    pub account_age_days: u32,

    /// Matches a known fraud pattern from an upstream system
    #[serde(default, deserialize_with = "null_as_default")]
    pub pattern_match: bool,
}

impl Transaction {
    /// Create a transaction with the given identity and amount; all behavioural
    /// fields take their neutral defaults.
    pub fn new(transaction_id: impl Into<String>, customer_id: impl Into<String>, amount: f64) -> Self {
        Self {
            transaction_id: Some(transaction_id.into()),
            customer_id: Some(customer_id.into()),
            amount,
            ..Self::default()
        }
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            transaction_id: None,
            customer_id: None,
            amount: 0.0,
            timestamp: None,
            hour: DEFAULT_HOUR,
            transactions_last_hour: 0,
            avg_transaction_amount: 0.0,
            location_changed: false,
            new_payee: false,
            account_age_days: DEFAULT_ACCOUNT_AGE_DAYS,
            pattern_match: false,
        }
    }
}
