//! # Runtime Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `EW_ADMIN_ADDRESS` | `admin` |
//! | `EW_SNAPSHOT_PATH` | `snapshot_path` |
//! | `EW_MAX_DEADLINE_DAYS` | `waste.max_deadline_days` |
//! | `EW_LOG_LEVEL` | `log_level` |
//!
//! Values that fail to parse are logged and ignored.
//!
//! ## Security Requirements
//!
//! - `admin` MUST NOT be the zero address. There is no default admin.

use std::path::PathBuf;

use ew_01_identity_registry::RegistryConfig;
use ew_02_waste_store::WasteStoreConfig;
use ew_03_shipment_tracker::ShipmentConfig;
use ew_04_compliance_engine::ComplianceConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::ActorId;
use thiserror::Error;
use tracing::{info, warn};

pub const ENV_ADMIN_ADDRESS: &str = "EW_ADMIN_ADDRESS";
pub const ENV_SNAPSHOT_PATH: &str = "EW_SNAPSHOT_PATH";
pub const ENV_MAX_DEADLINE_DAYS: &str = "EW_MAX_DEADLINE_DAYS";
pub const ENV_LOG_LEVEL: &str = "EW_LOG_LEVEL";

/// Log filter used when neither `RUST_LOG` nor `EW_LOG_LEVEL` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Identity registry configuration.
    pub registry: RegistryConfig,
    /// Waste store configuration.
    pub waste: WasteStoreConfig,
    /// Shipment tracker configuration.
    pub shipments: ShipmentConfig,
    /// Compliance engine configuration.
    pub compliance: ComplianceConfig,
    /// Bootstrap admin. Ignored when a snapshot already seats one.
    pub admin: ActorId,
    /// Where ledgers are restored from and saved to. `None` keeps state in memory only.
    pub snapshot_path: Option<PathBuf>,
    /// `EnvFilter` directive.
    pub log_level: String,
    /// Event bus channel capacity.
    pub bus_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            waste: WasteStoreConfig::default(),
            shipments: ShipmentConfig::default(),
            compliance: ComplianceConfig::default(),
            admin: ActorId::ZERO, // MUST be overridden
            snapshot_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl RuntimeConfig {
    /// Validate configuration before wiring.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the bootstrap admin is the zero address
    /// - `max_deadline_days` is zero
    /// - the bus capacity is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.is_zero() {
            return Err(ConfigError::MissingAdmin);
        }
        if self.waste.max_deadline_days == 0 {
            return Err(ConfigError::Invalid {
                field: "max_deadline_days",
                reason: "must be at least 1".into(),
            });
        }
        if self.bus_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "bus_capacity",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ADMIN_ADDRESS) {
            match raw.parse::<ActorId>() {
                Ok(admin) => {
                    self.admin = admin;
                    info!(admin = %admin, "Loaded bootstrap admin from environment");
                }
                Err(e) => warn!("{ENV_ADMIN_ADDRESS} ignored: {e}"),
            }
        }

        if let Some(raw) = lookup(ENV_SNAPSHOT_PATH) {
            if raw.trim().is_empty() {
                warn!("{ENV_SNAPSHOT_PATH} ignored: empty path");
            } else {
                self.snapshot_path = Some(PathBuf::from(raw));
            }
        }

        if let Some(raw) = lookup(ENV_MAX_DEADLINE_DAYS) {
            match raw.trim().parse::<u64>() {
                Ok(days) if days > 0 => self.waste.max_deadline_days = days,
                _ => warn!("{ENV_MAX_DEADLINE_DAYS} must be a positive integer, got {raw:?}"),
            }
        }

        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            if raw.trim().is_empty() {
                warn!("{ENV_LOG_LEVEL} ignored: empty filter");
            } else {
                self.log_level = raw.trim().to_string();
            }
        }

        self
    }
}

/// Load configuration from defaults and the process environment.
pub fn load_config() -> RuntimeConfig {
    RuntimeConfig::default().apply_overrides(|key| std::env::var(key).ok())
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No bootstrap admin was configured.
    #[error("Bootstrap admin is the zero address. Set {ENV_ADMIN_ADDRESS}.")]
    MissingAdmin,

    /// A field holds an unusable value.
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
