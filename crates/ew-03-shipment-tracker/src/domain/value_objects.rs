//! # Value Objects

use serde::{Deserialize, Serialize};
use shared_types::{ActorId, ShipmentId, WasteId};

use super::entities::{Shipment, ShipmentStatus};

/// Location recorded when a shipment is created without one.
pub const DEFAULT_LOCATION: &str = "Origin";

/// Shipment tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentConfig {
    /// Upper bound for free-text fields, in bytes.
    pub max_text_len: usize,
}

impl Default for ShipmentConfig {
    fn default() -> Self {
        Self { max_text_len: 4096 }
    }
}

/// Input to `create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShipmentRequest {
    pub waste_id: WasteId,
    pub producer: ActorId,
    pub receiver: ActorId,
    pub tracking_code: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

/// Input to `update_status`.
///
/// Empty `location` or `notes` keep the values already recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub shipment_id: ShipmentId,
    pub status: ShipmentStatus,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

/// A committed status update and the status it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentTransition {
    pub from: ShipmentStatus,
    pub shipment: Shipment,
}

/// Shipment counts for one transporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentSummary {
    pub total: usize,
    pub pending: usize,
    /// Picked up or in transit.
    pub in_progress: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl ShipmentSummary {
    /// Tally a set of shipments.
    pub fn tally<'a>(shipments: impl IntoIterator<Item = &'a Shipment>) -> Self {
        shipments
            .into_iter()
            .fold(Self::default(), |mut summary, shipment| {
                summary.total += 1;
                match shipment.status {
                    ShipmentStatus::Pending => summary.pending += 1,
                    ShipmentStatus::PickedUp | ShipmentStatus::InTransit => {
                        summary.in_progress += 1
                    }
                    ShipmentStatus::Delivered => summary.delivered += 1,
                    ShipmentStatus::Cancelled => summary.cancelled += 1,
                }
                summary
            })
    }
}
