//! # Domain Invariants
//!
//! Business rules for the Identity Registry.

use shared_types::{ActorProfile, Role};

use super::errors::RegistryError;

/// Invariant: exactly one stored record holds `Admin`.
pub fn invariant_single_admin(profiles: &[ActorProfile]) -> bool {
    profiles.iter().filter(|p| p.role == Role::Admin).count() == 1
}

/// Invariant: registration only grants working roles.
///
/// `Admin` moves only through `change_admin`; `Unregistered` is the absence
/// of a role and is never granted.
pub fn invariant_assignable_role(role: Role) -> Result<(), RegistryError> {
    match role {
        Role::Producer | Role::Recycler | Role::Logistics | Role::Regulator => Ok(()),
        Role::Admin => Err(RegistryError::InvalidRole {
            role,
            reason: "the admin seat moves only through change_admin",
        }),
        Role::Unregistered => Err(RegistryError::InvalidRole {
            role,
            reason: "not a grantable role",
        }),
    }
}
