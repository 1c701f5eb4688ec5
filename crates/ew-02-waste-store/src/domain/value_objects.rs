//! # Value Objects

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Waste store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteStoreConfig {
    /// Longest processing deadline a producer may set.
    pub max_deadline_days: u64,
    /// Upper bound for free-text fields, in bytes.
    pub max_text_len: usize,
}

impl Default for WasteStoreConfig {
    fn default() -> Self {
        Self {
            max_deadline_days: 3650,
            max_text_len: 4096,
        }
    }
}

/// Input to `log_waste`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogWasteRequest {
    pub waste_type: String,
    pub origin: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub description: String,
    /// Reference into the evidence store. Passed through untouched.
    #[serde(default)]
    pub evidence_ref: String,
    /// Days from now until processing is due.
    pub deadline_days: u64,
}
