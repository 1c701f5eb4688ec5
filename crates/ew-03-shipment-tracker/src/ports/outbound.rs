//! Driven Ports (SPI - Outbound)

use shared_types::Ledger;

use crate::domain::Shipment;

/// Shipment table of the ledger collaborator.
pub type ShipmentLedger = dyn Ledger<Shipment>;
