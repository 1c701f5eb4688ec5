//! # EW-01 Identity Registry
//!
//! Maps an actor address to one registered role and a profile.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Self-service registration under a working role
//! - The single admin seat, moved only by the sitting admin
//! - `get_by_role`, the authorization primitive every other subsystem
//!   relies on
//!
//! ## Role Gate
//!
//! | Stored record | Requested role | Result |
//! |---------------|----------------|--------|
//! | none | any | `NotRegistered` |
//! | `Unregistered` | any | `NotRegistered` |
//! | role R | R | profile |
//! | role R | S ≠ R | `Unauthorized` |
//!
//! ## Module Structure
//!
//! ```text
//! ew-01-identity-registry/
//! ├── domain/          # RegistryError, RegistryConfig, invariants
//! ├── ports/           # IdentityRegistryApi, ActorLedger
//! └── service.rs       # IdentityRegistry
//! ```

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    invariant_assignable_role, invariant_single_admin, AdminChange, RegistryConfig,
    RegistryError, RegistryResult, DEFAULT_ADMIN_NAME,
};
pub use ports::{ActorLedger, IdentityRegistryApi};
pub use service::IdentityRegistry;
