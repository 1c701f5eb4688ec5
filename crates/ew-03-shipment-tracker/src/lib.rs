//! # EW-03 Shipment Tracker
//!
//! Custody-in-transit records for waste items.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Status Machine
//!
//! ```text
//! [Pending] ──→ [PickedUp] ──→ [InTransit] ──→ [Delivered]
//!     │             │              │
//!     └─────────────┴──────────────┴──────────→ [Cancelled]
//! ```
//!
//! - Forward moves may skip states; regressions fail with `InvalidTransition`.
//! - A same-status update records a new location or note.
//! - `Delivered` and `Cancelled` are terminal: any update fails with
//!   `TerminalState`.
//! - Only the transporter that created a shipment may update it.

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    invariant_status_transition, CreateShipmentRequest, Shipment, ShipmentConfig, ShipmentError,
    ShipmentResult, ShipmentStatus, ShipmentSummary, ShipmentTransition, StatusUpdate,
    DEFAULT_LOCATION,
};
pub use ports::{ShipmentLedger, ShipmentTrackerApi};
pub use service::ShipmentTracker;
