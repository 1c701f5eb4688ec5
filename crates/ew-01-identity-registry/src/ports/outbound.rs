//! Driven Ports (SPI - Outbound)

use shared_types::{ActorProfile, Ledger};

/// Actor table of the ledger collaborator.
pub type ActorLedger = dyn Ledger<ActorProfile>;
