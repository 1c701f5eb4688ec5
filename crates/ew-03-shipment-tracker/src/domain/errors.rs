//! # Domain Errors

use shared_types::{
    AccessDenied, ActorId, ErrorKind, FieldViolation, HasErrorKind, LedgerError, ShipmentId,
    WasteId,
};
use thiserror::Error;

use super::entities::ShipmentStatus;

/// Shipment Tracker errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShipmentError {
    /// Role gate refused the caller.
    #[error(transparent)]
    Access(#[from] AccessDenied),

    /// Malformed input field.
    #[error(transparent)]
    InvalidField(#[from] FieldViolation),

    /// Referenced waste item does not exist.
    #[error("Waste item not found: {waste_id}")]
    WasteNotFound { waste_id: WasteId },

    /// Unknown shipment.
    #[error("Shipment not found: {shipment_id}")]
    NotFound { shipment_id: ShipmentId },

    /// Processed waste is no longer shipped.
    #[error("Waste item {waste_id} is already processed")]
    WasteProcessed { waste_id: WasteId },

    /// Supplied producer is not the producer of the waste item.
    #[error("Waste item {waste_id} was logged by {expected}, not {supplied}")]
    ProducerMismatch {
        waste_id: WasteId,
        expected: ActorId,
        supplied: ActorId,
    },

    /// Caller is not the shipment's transporter.
    #[error("Actor {caller} is not the transporter of shipment {shipment_id}")]
    NotTransporter {
        shipment_id: ShipmentId,
        caller: ActorId,
    },

    /// Shipment is delivered or cancelled.
    #[error("Shipment {shipment_id} is {status} and accepts no further updates")]
    TerminalState {
        shipment_id: ShipmentId,
        status: ShipmentStatus,
    },

    /// Status would move backwards.
    #[error("Invalid shipment transition for {shipment_id}: {from} -> {to}")]
    InvalidTransition {
        shipment_id: ShipmentId,
        from: ShipmentStatus,
        to: ShipmentStatus,
    },

    /// Ledger failure.
    #[error("Shipment ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl HasErrorKind for ShipmentError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(denied) => denied.kind(),
            Self::InvalidField(_) | Self::ProducerMismatch { .. } => ErrorKind::InvalidInput,
            Self::WasteNotFound { .. } | Self::NotFound { .. } => ErrorKind::NotFound,
            Self::WasteProcessed { .. } => ErrorKind::InvalidState,
            Self::NotTransporter { .. } => ErrorKind::Unauthorized,
            Self::TerminalState { .. } => ErrorKind::TerminalState,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Ledger(err) => err.kind(),
        }
    }
}

/// Result alias for shipment operations.
pub type ShipmentResult<T> = Result<T, ShipmentError>;
