//! # Domain Invariants

use shared_types::ShipmentId;

use super::entities::ShipmentStatus;
use super::errors::ShipmentError;

/// Invariant: status never regresses and terminal states are final.
///
/// Same-status updates pass so a transporter can record a new location.
pub fn invariant_status_transition(
    shipment_id: ShipmentId,
    from: ShipmentStatus,
    to: ShipmentStatus,
) -> Result<(), ShipmentError> {
    if from.is_terminal() {
        return Err(ShipmentError::TerminalState {
            shipment_id,
            status: from,
        });
    }
    match (from.rank(), to.rank()) {
        (_, None) => Ok(()),
        (Some(current), Some(next)) if next >= current => Ok(()),
        _ => Err(ShipmentError::InvalidTransition {
            shipment_id,
            from,
            to,
        }),
    }
}
