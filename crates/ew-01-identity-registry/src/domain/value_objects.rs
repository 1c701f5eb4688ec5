//! # Value Objects
//!
//! Configuration and result types for the Identity Registry.

use serde::{Deserialize, Serialize};
use shared_types::ActorId;

/// Display name given to an admin that had no prior record.
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Upper bound for `name` and `contact_info`, in bytes.
    pub max_text_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { max_text_len: 4096 }
    }
}

/// Result of `change_admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminChange {
    pub previous: ActorId,
    pub current: ActorId,
}

impl AdminChange {
    /// False when the seat was handed to the actor already holding it.
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}
