//! Shipment Tracker Service - Core business logic

use shared_types::{
    check_text, require_role, ActorProfile, FieldViolation, Ledger, Role, ShipmentId,
    TimeSource, Versioned, WasteItem,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{
    invariant_status_transition, CreateShipmentRequest, Shipment, ShipmentConfig, ShipmentError,
    ShipmentResult, ShipmentStatus, ShipmentSummary, ShipmentTransition, StatusUpdate,
    DEFAULT_LOCATION,
};
use crate::ports::{ShipmentLedger, ShipmentTrackerApi};

/// Shipment Tracker implementation.
pub struct ShipmentTracker {
    config: ShipmentConfig,
    shipments: Arc<ShipmentLedger>,
    waste: Arc<dyn Ledger<WasteItem>>,
    clock: Arc<dyn TimeSource>,
}

impl ShipmentTracker {
    /// Create the tracker. `waste` is only read.
    pub fn new(
        config: ShipmentConfig,
        shipments: Arc<ShipmentLedger>,
        waste: Arc<dyn Ledger<WasteItem>>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            shipments,
            waste,
            clock,
        }
    }

    fn load(&self, shipment_id: ShipmentId) -> ShipmentResult<Versioned<Shipment>> {
        self.shipments
            .get(shipment_id)?
            .ok_or(ShipmentError::NotFound { shipment_id })
    }

    /// Validate an update against the stored row and build the new record.
    fn apply(
        &self,
        transporter: &ActorProfile,
        row: &Versioned<Shipment>,
        update: &StatusUpdate,
    ) -> ShipmentResult<Shipment> {
        let current = &row.record;
        if current.transporter != transporter.id {
            return Err(ShipmentError::NotTransporter {
                shipment_id: current.id,
                caller: transporter.id,
            });
        }
        invariant_status_transition(current.id, current.status, update.status)?;

        let keep_or = |incoming: &str, existing: &str| {
            if incoming.trim().is_empty() {
                existing.to_string()
            } else {
                incoming.to_string()
            }
        };
        Ok(Shipment {
            status: update.status,
            location: keep_or(&update.location, &current.location),
            notes: keep_or(&update.notes, &current.notes),
            updated_at: self.clock.now(),
            ..current.clone()
        })
    }

    fn owned_by(&self, transporter: &ActorProfile) -> ShipmentResult<Vec<Shipment>> {
        require_role(transporter, Role::Logistics)?;
        let owner = transporter.id;
        Ok(self.shipments.filter(&|s: &Shipment| s.transporter == owner)?)
    }
}

impl ShipmentTrackerApi for ShipmentTracker {
    fn create(
        &self,
        transporter: &ActorProfile,
        request: CreateShipmentRequest,
    ) -> ShipmentResult<Shipment> {
        require_role(transporter, Role::Logistics)?;

        let max = self.config.max_text_len;
        check_text("tracking_code", &request.tracking_code, max, true)?;
        check_text("location", &request.location, max, false)?;
        check_text("notes", &request.notes, max, false)?;
        if request.receiver.is_zero() {
            return Err(FieldViolation::new("receiver", "zero address").into());
        }

        let waste_id = request.waste_id;
        let waste = self
            .waste
            .find(waste_id)?
            .ok_or(ShipmentError::WasteNotFound { waste_id })?;
        if waste.is_processed {
            warn!(waste_id = %waste_id, "[ew-03] Shipment rejected: waste already processed");
            return Err(ShipmentError::WasteProcessed { waste_id });
        }
        if waste.producer != request.producer {
            return Err(ShipmentError::ProducerMismatch {
                waste_id,
                expected: waste.producer,
                supplied: request.producer,
            });
        }

        let now = self.clock.now();
        let location = if request.location.trim().is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            request.location
        };
        let shipment = Shipment {
            id: ShipmentId(self.shipments.next_sequence()?),
            waste_id,
            transporter: transporter.id,
            producer: request.producer,
            receiver: request.receiver,
            tracking_code: request.tracking_code,
            status: ShipmentStatus::Pending,
            location,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };
        let row = self.shipments.insert(shipment)?;

        info!(
            "[ew-03] Shipment {} created for waste {} by {} ({})",
            row.record.id, waste_id, transporter.id, row.record.tracking_code
        );
        Ok(row.record)
    }

    fn update_status(
        &self,
        transporter: &ActorProfile,
        update: StatusUpdate,
    ) -> ShipmentResult<ShipmentTransition> {
        require_role(transporter, Role::Logistics)?;
        check_text("location", &update.location, self.config.max_text_len, false)?;
        check_text("notes", &update.notes, self.config.max_text_len, false)?;

        let row = self.load(update.shipment_id)?;
        let from = row.record.status;
        let next = self.apply(transporter, &row, &update).map_err(|err| {
            warn!(shipment_id = %update.shipment_id, error = %err, "[ew-03] Status update rejected");
            err
        })?;

        let written = match self.shipments.compare_and_swap(row.version, next) {
            Ok(written) => written,
            Err(err) if err.is_conflict() => {
                // Lost the race: report what the winner's state forbids.
                let latest = self.load(update.shipment_id)?;
                self.apply(transporter, &latest, &update)?;
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            "[ew-03] Shipment {} moved {} -> {} at {}",
            written.record.id, from, written.record.status, written.record.location
        );
        Ok(ShipmentTransition {
            from,
            shipment: written.record,
        })
    }

    fn list_by_transporter(&self, transporter: &ActorProfile) -> ShipmentResult<Vec<Shipment>> {
        let shipments = self.owned_by(transporter)?;
        debug!(
            transporter = %transporter.id,
            count = shipments.len(),
            "[ew-03] Listed shipments"
        );
        Ok(shipments)
    }

    fn get(&self, shipment_id: ShipmentId) -> ShipmentResult<Shipment> {
        self.load(shipment_id).map(Versioned::into_record)
    }

    fn summary(&self, transporter: &ActorProfile) -> ShipmentResult<ShipmentSummary> {
        Ok(ShipmentSummary::tally(&self.owned_by(transporter)?))
    }
}
