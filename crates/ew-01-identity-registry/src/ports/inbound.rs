//! Driving Ports (API - Inbound)

use shared_types::{ActorId, ActorProfile, Role};

use crate::domain::{AdminChange, RegistryResult};

/// Primary Identity Registry API.
pub trait IdentityRegistryApi: Send + Sync {
    /// Self-service registration under a working role.
    ///
    /// Fails with `AlreadyRegistered` if the actor holds any role. An actor
    /// whose record was demoted to `Unregistered` may register again.
    fn register(
        &self,
        actor: ActorId,
        name: &str,
        role: Role,
        contact_info: &str,
    ) -> RegistryResult<ActorProfile>;

    /// Resolve `actor` and check it holds `expected`.
    ///
    /// The authorization primitive used by every other subsystem.
    fn get_by_role(&self, actor: ActorId, expected: Role) -> RegistryResult<ActorProfile>;

    /// Hand the admin seat to `new_admin`. Only the sitting admin may call.
    fn change_admin(&self, caller: ActorId, new_admin: ActorId) -> RegistryResult<AdminChange>;

    /// Admin-only registration on behalf of another actor.
    ///
    /// May overwrite an existing working role.
    fn assign_role(
        &self,
        caller: ActorId,
        actor: ActorId,
        name: &str,
        role: Role,
        contact_info: &str,
    ) -> RegistryResult<ActorProfile>;

    /// The sitting admin.
    fn admin(&self) -> ActorId;

    /// Raw lookup, no role check.
    fn profile(&self, actor: ActorId) -> RegistryResult<ActorProfile>;

    /// Every actor currently holding `role`.
    fn list_by_role(&self, role: Role) -> RegistryResult<Vec<ActorProfile>>;
}
