//! # Core Domain Entities
//!
//! Records that more than one custody subsystem reads or writes.
//!
//! ## Clusters
//!
//! - **Identity**: `ActorId`, `Role`, `ActorProfile`
//! - **Material**: `WasteId`, `WasteItem`
//! - **Custody identifiers**: `ShipmentId`, `AuditId`, `NonComplianceId`,
//!   `CertificateId`
//!
//! Shipments, audits, non-compliance records and certificates are owned by a
//! single subsystem each and live in that subsystem's crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::ledger::LedgerRecord;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Seconds in one calendar day, used for deadline arithmetic.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// A 20-byte ledger address identifying an actor.
///
/// The session collaborator hands these over as `0x`-prefixed hex strings;
/// parsing is case-insensitive and the canonical form is lowercase.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ActorId(pub [u8; 20]);

impl ActorId {
    /// The all-zero address. Never a valid admin.
    pub const ZERO: ActorId = ActorId([0u8; 20]);

    /// Build an id from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns true for the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

/// Failure to parse an actor address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Input was not valid hex.
    #[error("Address is not valid hex: {0}")]
    InvalidHex(String),

    /// Input decoded to the wrong number of bytes.
    #[error("Address must be 20 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for ActorId {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        let array: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({self})")
    }
}

impl Serialize for ActorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The capability class an actor is registered under.
///
/// Closed set: every authorization point matches on it exhaustively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Logs waste items.
    Producer,
    /// Marks waste items as processed.
    Recycler,
    /// Owns shipments in transit.
    Logistics,
    /// Audits waste, issues certificates, tracks non-compliance.
    Regulator,
    /// Holds the single admin seat.
    Admin,
    /// No active role. Demoted admins land here.
    #[default]
    Unregistered,
}

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Role; 6] = [
        Role::Producer,
        Role::Recycler,
        Role::Logistics,
        Role::Regulator,
        Role::Admin,
        Role::Unregistered,
    ];

    /// Whether this role grants access to any role-gated action.
    pub fn is_registered(&self) -> bool {
        !matches!(self, Role::Unregistered)
    }

    /// Whether an actor may pick this role through self-service registration.
    pub fn is_self_service(&self) -> bool {
        match self {
            Role::Producer | Role::Recycler | Role::Logistics | Role::Regulator => true,
            Role::Admin | Role::Unregistered => false,
        }
    }

    /// Stable display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Producer => "Producer",
            Role::Recycler => "Recycler",
            Role::Logistics => "Logistics",
            Role::Regulator => "Regulator",
            Role::Admin => "Admin",
            Role::Unregistered => "Unregistered",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A registered actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
    /// Ledger address.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Active role.
    pub role: Role,
    /// Free-form contact details.
    pub contact_info: String,
    /// When the current role was granted.
    pub registered_at: Timestamp,
}

impl ActorProfile {
    /// Returns true if this profile holds `role`.
    pub fn holds(&self, role: Role) -> bool {
        self.role.is_registered() && self.role == role
    }
}

impl LedgerRecord for ActorProfile {
    type Id = ActorId;
    const TABLE: &'static str = "actors";

    fn id(&self) -> ActorId {
        self.id
    }
}

// =============================================================================
// CLUSTER B: MATERIAL
// =============================================================================

crate::ledger_id! {
    /// Sequential waste item identifier, starting at 1.
    WasteId
}

/// A logged batch of electronic waste.
///
/// `producer` is fixed at creation. `is_processed` flips false → true once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteItem {
    pub id: WasteId,
    pub producer: ActorId,
    pub waste_type: String,
    pub origin: String,
    pub quantity: Decimal,
    pub description: String,
    /// Opaque reference into the evidence store (e.g. an image hash).
    pub evidence_ref: String,
    pub logged_at: Timestamp,
    pub deadline: Timestamp,
    pub is_processed: bool,
    /// Recycler that processed the item, once processed.
    pub processed_by: Option<ActorId>,
    pub processed_at: Option<Timestamp>,
}

impl WasteItem {
    /// Unprocessed and past its deadline.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        !self.is_processed && now > self.deadline
    }
}

impl LedgerRecord for WasteItem {
    type Id = WasteId;
    const TABLE: &'static str = "waste_items";

    fn id(&self) -> WasteId {
        self.id
    }
}

// =============================================================================
// CLUSTER C: CUSTODY IDENTIFIERS
// =============================================================================

crate::ledger_id! {
    /// Shipment identifier.
    ShipmentId
}

crate::ledger_id! {
    /// Audit identifier.
    AuditId
}

crate::ledger_id! {
    /// Non-compliance case identifier.
    NonComplianceId
}

crate::ledger_id! {
    /// Certificate identifier.
    CertificateId
}
