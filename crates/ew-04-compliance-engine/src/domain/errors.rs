//! # Domain Errors

use shared_types::{
    AccessDenied, ErrorKind, FieldViolation, HasErrorKind, LedgerError, NonComplianceId, WasteId,
};
use thiserror::Error;

use super::entities::NonComplianceStatus;

/// Compliance Engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplianceError {
    /// Role gate refused the caller.
    #[error(transparent)]
    Access(#[from] AccessDenied),

    /// Malformed input field.
    #[error(transparent)]
    InvalidField(#[from] FieldViolation),

    /// Referenced waste item does not exist.
    #[error("Waste item not found: {waste_id}")]
    WasteNotFound { waste_id: WasteId },

    /// Unknown non-compliance case.
    #[error("Non-compliance record not found: {record_id}")]
    RecordNotFound { record_id: NonComplianceId },

    /// Certificate gate: waste not processed.
    #[error("Waste item {waste_id} is not processed")]
    NotProcessed { waste_id: WasteId },

    /// Certificate gate: no compliant audit.
    #[error("Waste item {waste_id} has no compliant audit")]
    NoCompliantAudit { waste_id: WasteId },

    /// Case status may only move forward.
    #[error("Invalid non-compliance transition for {record_id}: {from} -> {to}")]
    InvalidTransition {
        record_id: NonComplianceId,
        from: NonComplianceStatus,
        to: NonComplianceStatus,
    },

    /// Ledger failure.
    #[error("Compliance ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl HasErrorKind for ComplianceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(denied) => denied.kind(),
            Self::InvalidField(_) => ErrorKind::InvalidInput,
            Self::WasteNotFound { .. } | Self::RecordNotFound { .. } => ErrorKind::NotFound,
            Self::NotProcessed { .. } => ErrorKind::NotProcessed,
            Self::NoCompliantAudit { .. } => ErrorKind::NoCompliantAudit,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Ledger(err) => err.kind(),
        }
    }
}

/// Result alias for compliance operations.
pub type ComplianceResult<T> = Result<T, ComplianceError>;
