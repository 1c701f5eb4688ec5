//! # EW-05 Lifecycle Orchestrator
//!
//! The single entry point for custody actions.
//!
//! **Subsystem ID:** 5
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Flow
//!
//! ```text
//! caller + Action
//!     │
//!     ▼
//! Orchestrator ──get_by_role──→ Identity Registry (1)
//!     │
//!     ├── log_waste / mark_processed ───────────→ Waste Store (2)
//!     ├── create_shipment / update_shipment ────→ Shipment Tracker (3)
//!     ├── submit_audit / issue_certificate ─────→ Compliance Engine (4)
//!     │
//!     └── CustodyEvent ──→ Event Bus (after commit)
//! ```
//!
//! ## Guarantees
//!
//! - One role check per call, before any write.
//! - The owning subsystem re-checks the role it was handed.
//! - No retries. Errors carry the most specific `ErrorKind`.
//! - Events are published only for committed actions.
//!
//! Read-only actions are open to any caller, except the shipment listings,
//! which are scoped to the calling transporter.

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{Action, LifecycleError, LifecycleResult, Outcome};
pub use ports::LifecycleApi;
pub use service::LifecycleOrchestrator;
