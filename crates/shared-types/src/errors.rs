//! # Error Types
//!
//! The error taxonomy shared by every custody subsystem.
//!
//! Each subsystem keeps its own `thiserror` enum with full context. They all
//! classify into one `ErrorKind` so the orchestrator and the action surface
//! can report a stable, most-specific kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::entities::{ActorId, ActorProfile, Role};

/// Stable, serializable error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No record for the actor, or the actor holds no role.
    NotRegistered,
    /// Registered, but wrong role or not the owner of the resource.
    Unauthorized,
    /// Actor already holds a role.
    AlreadyRegistered,
    /// Referenced entity does not exist.
    NotFound,
    /// Malformed or out-of-range field.
    InvalidInput,
    /// Action not legal in the entity's current state.
    InvalidState,
    /// Requested status change is not allowed.
    InvalidTransition,
    /// Waste item was processed already.
    AlreadyProcessed,
    /// Waste item is not processed yet.
    NotProcessed,
    /// No compliant audit exists for the waste item.
    NoCompliantAudit,
    /// Shipment is delivered or cancelled.
    TerminalState,
    /// A concurrent write won the race.
    Conflict,
    /// The ledger collaborator failed.
    Storage,
}

impl ErrorKind {
    /// snake_case name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotRegistered => "not_registered",
            Self::Unauthorized => "unauthorized",
            Self::AlreadyRegistered => "already_registered",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::InvalidState => "invalid_state",
            Self::InvalidTransition => "invalid_transition",
            Self::AlreadyProcessed => "already_processed",
            Self::NotProcessed => "not_processed",
            Self::NoCompliantAudit => "no_compliant_audit",
            Self::TerminalState => "terminal_state",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every subsystem error.
pub trait HasErrorKind {
    /// Classification of this error.
    fn kind(&self) -> ErrorKind;
}

/// Serializable error returned over the action surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorPayload {
    /// Build a payload from any classified error.
    pub fn from_error<E: HasErrorKind + fmt::Display>(err: &E) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: String,
}

impl FieldViolation {
    /// Build a violation.
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl HasErrorKind for FieldViolation {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// A role gate refused the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The caller has no record or holds no role.
    #[error("Actor {actor} is not registered")]
    NotRegistered { actor: ActorId },

    /// The caller holds a role, but not the one the action needs.
    #[error("Actor {actor} holds role {actual}, action requires {required}")]
    WrongRole {
        actor: ActorId,
        required: Role,
        actual: Role,
    },
}

impl AccessDenied {
    /// The actor that was refused.
    pub fn actor(&self) -> ActorId {
        match self {
            Self::NotRegistered { actor } | Self::WrongRole { actor, .. } => *actor,
        }
    }
}

impl HasErrorKind for AccessDenied {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotRegistered { .. } => ErrorKind::NotRegistered,
            Self::WrongRole { .. } => ErrorKind::Unauthorized,
        }
    }
}

/// Gate an action on the caller's stored role.
///
/// `Unregistered` never satisfies a gate, whatever `required` is.
pub fn require_role(profile: &ActorProfile, required: Role) -> Result<(), AccessDenied> {
    match profile.role {
        Role::Unregistered => Err(AccessDenied::NotRegistered { actor: profile.id }),
        actual if actual == required => Ok(()),
        actual @ (Role::Producer
        | Role::Recycler
        | Role::Logistics
        | Role::Regulator
        | Role::Admin) => Err(AccessDenied::WrongRole {
            actor: profile.id,
            required,
            actual,
        }),
    }
}

/// Check a free-text field against a length bound.
pub fn check_text(
    field: &'static str,
    value: &str,
    max_len: usize,
    required: bool,
) -> Result<(), FieldViolation> {
    if required && value.trim().is_empty() {
        return Err(FieldViolation::new(field, "must not be empty"));
    }
    if value.len() > max_len {
        return Err(FieldViolation::new(
            field,
            format!("length {} exceeds {}", value.len(), max_len),
        ));
    }
    Ok(())
}
