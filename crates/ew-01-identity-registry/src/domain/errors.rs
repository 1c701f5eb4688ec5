//! # Domain Errors
//!
//! Error types for the Identity Registry.

use shared_types::{
    AccessDenied, ActorId, ErrorKind, FieldViolation, HasErrorKind, LedgerError, Role,
};
use thiserror::Error;

/// Identity Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Role gate refused the caller.
    #[error(transparent)]
    Access(#[from] AccessDenied),

    /// Actor already holds a role.
    #[error("Actor {actor} is already registered as {role}")]
    AlreadyRegistered { actor: ActorId, role: Role },

    /// Caller is not the sitting admin.
    #[error("Actor {caller} is not the admin")]
    NotAdmin { caller: ActorId },

    /// Requested role cannot be granted through this operation.
    #[error("Role {role} cannot be granted here: {reason}")]
    InvalidRole { role: Role, reason: &'static str },

    /// The all-zero address was supplied where a real actor is required.
    #[error("Zero address is not a valid {field}")]
    ZeroAddress { field: &'static str },

    /// The admin's own record cannot be reassigned.
    #[error("Actor {actor} holds the admin seat; use change_admin")]
    AdminSeatProtected { actor: ActorId },

    /// No record for the actor.
    #[error("Actor not found: {actor}")]
    NotFound { actor: ActorId },

    /// The stored actor table does not hold exactly one admin.
    #[error("Actor table holds {admins} admin records, expected exactly one")]
    CorruptSeat { admins: usize },

    /// Malformed input field.
    #[error(transparent)]
    InvalidField(#[from] FieldViolation),

    /// Ledger failure.
    #[error("Registry ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl HasErrorKind for RegistryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(denied) => denied.kind(),
            Self::AlreadyRegistered { .. } => ErrorKind::AlreadyRegistered,
            Self::NotAdmin { .. } => ErrorKind::Unauthorized,
            Self::InvalidRole { .. } | Self::ZeroAddress { .. } | Self::InvalidField(_) => {
                ErrorKind::InvalidInput
            }
            Self::AdminSeatProtected { .. } => ErrorKind::InvalidState,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::CorruptSeat { .. } => ErrorKind::Storage,
            Self::Ledger(err) => err.kind(),
        }
    }
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
