//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{ActorId, LedgerRecord, ShipmentId, Timestamp, WasteId};
use std::fmt;

/// Shipment status.
///
/// Declaration order is the forward order of the chain. `Cancelled` sits
/// outside it and is reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Pending,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    /// All statuses in declaration order.
    pub const ALL: [ShipmentStatus; 5] = [
        Self::Pending,
        Self::PickedUp,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Position in the forward chain. `None` for `Cancelled`.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::PickedUp => Some(1),
            Self::InTransit => Some(2),
            Self::Delivered => Some(3),
            Self::Cancelled => None,
        }
    }

    /// No update is accepted from a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Stable display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PickedUp => "PickedUp",
            Self::InTransit => "InTransit",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A waste item in the hands of a transporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub waste_id: WasteId,
    /// Logistics actor that created, and owns, the shipment.
    pub transporter: ActorId,
    pub producer: ActorId,
    pub receiver: ActorId,
    pub tracking_code: String,
    pub status: ShipmentStatus,
    pub location: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LedgerRecord for Shipment {
    type Id = ShipmentId;
    const TABLE: &'static str = "shipments";

    fn id(&self) -> ShipmentId {
        self.id
    }
}
