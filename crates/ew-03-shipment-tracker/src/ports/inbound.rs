//! Driving Ports (API - Inbound)

use shared_types::{ActorProfile, ShipmentId};

use crate::domain::{
    CreateShipmentRequest, Shipment, ShipmentResult, ShipmentSummary, ShipmentTransition,
    StatusUpdate,
};

/// Primary Shipment Tracker API.
pub trait ShipmentTrackerApi: Send + Sync {
    /// Open a shipment in `Pending`. Caller must be Logistics and becomes
    /// the transporter.
    fn create(
        &self,
        transporter: &ActorProfile,
        request: CreateShipmentRequest,
    ) -> ShipmentResult<Shipment>;

    /// Move a shipment along its status machine. Only its transporter may.
    fn update_status(
        &self,
        transporter: &ActorProfile,
        update: StatusUpdate,
    ) -> ShipmentResult<ShipmentTransition>;

    /// Shipments owned by the caller, in id order.
    fn list_by_transporter(&self, transporter: &ActorProfile) -> ShipmentResult<Vec<Shipment>>;

    /// One shipment by id.
    fn get(&self, shipment_id: ShipmentId) -> ShipmentResult<Shipment>;

    /// Status counts over the caller's shipments.
    fn summary(&self, transporter: &ActorProfile) -> ShipmentResult<ShipmentSummary>;
}
