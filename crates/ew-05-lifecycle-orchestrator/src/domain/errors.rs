//! # Domain Errors

use ew_01_identity_registry::RegistryError;
use ew_02_waste_store::WasteError;
use ew_03_shipment_tracker::ShipmentError;
use ew_04_compliance_engine::ComplianceError;
use shared_types::{ErrorKind, ErrorPayload, HasErrorKind};
use thiserror::Error;

/// Any error an action can end in.
///
/// Wraps the owning subsystem's error unchanged, so `kind()` is always the
/// most specific classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Waste(#[from] WasteError),

    #[error(transparent)]
    Shipment(#[from] ShipmentError),

    #[error(transparent)]
    Compliance(#[from] ComplianceError),
}

impl HasErrorKind for LifecycleError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(err) => err.kind(),
            Self::Waste(err) => err.kind(),
            Self::Shipment(err) => err.kind(),
            Self::Compliance(err) => err.kind(),
        }
    }
}

impl LifecycleError {
    /// Wire form.
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload::from_error(self)
    }
}

/// Result alias for orchestrator operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;
