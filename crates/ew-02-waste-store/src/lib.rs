//! # EW-02 Waste Item Store
//!
//! Holds logged waste batches and the one-way processing flag.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Lifecycle
//!
//! ```text
//! Producer ──log_waste──→ [unprocessed] ──mark_processed (Recycler)──→ [processed]
//!                               │
//!                               └── now > deadline ──→ listed by list_overdue
//! ```
//!
//! `is_processed` flips once. A second `mark_processed` fails with
//! `AlreadyProcessed`, including when two recyclers race for the same item.

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    deadline_from, invariant_non_negative_quantity, LogWasteRequest, WasteError, WasteResult,
    WasteStoreConfig,
};
pub use ports::{WasteLedger, WasteStoreApi};
pub use service::WasteStore;
