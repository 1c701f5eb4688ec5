//! # Custody Container
//!
//! Configuration and dependency injection for the runtime.
//!
//! - Subsystems initialized in dependency order (ledgers first, orchestrator last)
//! - Every action goes through the orchestrator; subsystems never call each other
//! - Ledger tables stay concrete here so snapshots can export them

pub mod config;
pub mod subsystems;

pub use config::{load_config, ConfigError, RuntimeConfig};
pub use subsystems::{CustodyContainer, LedgerTables};
