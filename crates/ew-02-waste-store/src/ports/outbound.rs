//! Driven Ports (SPI - Outbound)

use shared_types::{Ledger, WasteItem};

/// Waste item table of the ledger collaborator. Shared read-only with the
/// shipment tracker and the compliance engine.
pub type WasteLedger = dyn Ledger<WasteItem>;
