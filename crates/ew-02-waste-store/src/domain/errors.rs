//! # Domain Errors

use shared_types::{
    AccessDenied, ActorId, ErrorKind, FieldViolation, HasErrorKind, LedgerError, WasteId,
};
use thiserror::Error;

/// Waste Item Store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WasteError {
    /// Role gate refused the caller.
    #[error(transparent)]
    Access(#[from] AccessDenied),

    /// Malformed input field.
    #[error(transparent)]
    InvalidField(#[from] FieldViolation),

    /// Unknown waste item.
    #[error("Waste item not found: {waste_id}")]
    NotFound { waste_id: WasteId },

    /// The processing flag is already set.
    #[error("Waste item {waste_id} already processed by {processed_by:?}")]
    AlreadyProcessed {
        waste_id: WasteId,
        processed_by: Option<ActorId>,
    },

    /// Ledger failure.
    #[error("Waste ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl HasErrorKind for WasteError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(denied) => denied.kind(),
            Self::InvalidField(_) => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyProcessed { .. } => ErrorKind::AlreadyProcessed,
            Self::Ledger(err) => err.kind(),
        }
    }
}

/// Result alias for waste store operations.
pub type WasteResult<T> = Result<T, WasteError>;
