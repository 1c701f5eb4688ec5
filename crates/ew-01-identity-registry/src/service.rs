//! Identity Registry Service - Core business logic

use parking_lot::RwLock;
use shared_types::{
    check_text, require_role, AccessDenied, ActorId, ActorProfile, LedgerError, Role,
    TimeSource, Timestamp,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::{
    invariant_assignable_role, AdminChange, RegistryConfig, RegistryError, RegistryResult,
    DEFAULT_ADMIN_NAME,
};
use crate::ports::{ActorLedger, IdentityRegistryApi};

/// Identity Registry implementation.
///
/// The admin seat is cached under a lock. `change_admin` and `assign_role`
/// take that lock, so the seat cannot move while an admin-mediated write is
/// in flight.
pub struct IdentityRegistry {
    config: RegistryConfig,
    actors: Arc<ActorLedger>,
    clock: Arc<dyn TimeSource>,
    admin: RwLock<ActorId>,
}

impl IdentityRegistry {
    /// Create the registry and seat the first admin.
    ///
    /// If the actor table already holds an admin (restored snapshot), that
    /// admin keeps the seat and `bootstrap_admin` is ignored.
    pub fn new(
        config: RegistryConfig,
        actors: Arc<ActorLedger>,
        clock: Arc<dyn TimeSource>,
        bootstrap_admin: ActorId,
    ) -> RegistryResult<Self> {
        if bootstrap_admin.is_zero() {
            return Err(RegistryError::ZeroAddress { field: "admin" });
        }

        let admins = actors.filter(&|p: &ActorProfile| p.role == Role::Admin)?;
        let seat = match admins.as_slice() {
            [] => {
                Self::promote(actors.as_ref(), clock.now(), bootstrap_admin)?;
                info!("[ew-01] Admin seat initialized for {}", bootstrap_admin);
                bootstrap_admin
            }
            [existing] => {
                if existing.id != bootstrap_admin {
                    warn!(
                        restored = %existing.id,
                        configured = %bootstrap_admin,
                        "[ew-01] Restored admin differs from configured bootstrap admin"
                    );
                }
                existing.id
            }
            many => return Err(RegistryError::CorruptSeat { admins: many.len() }),
        };

        Ok(Self {
            config,
            actors,
            clock,
            admin: RwLock::new(seat),
        })
    }

    fn check_profile_text(&self, name: &str, contact_info: &str) -> RegistryResult<()> {
        check_text("name", name, self.config.max_text_len, true)?;
        check_text("contact_info", contact_info, self.config.max_text_len, false)?;
        Ok(())
    }

    /// Give `actor` the admin role. Returns the record it replaced.
    fn promote(
        actors: &ActorLedger,
        now: Timestamp,
        actor: ActorId,
    ) -> RegistryResult<Option<ActorProfile>> {
        match actors.get(actor)? {
            Some(row) => {
                let previous = row.record.clone();
                let promoted = ActorProfile {
                    role: Role::Admin,
                    registered_at: now,
                    ..row.record
                };
                actors.compare_and_swap(row.version, promoted)?;
                Ok(Some(previous))
            }
            None => {
                actors.insert(ActorProfile {
                    id: actor,
                    name: DEFAULT_ADMIN_NAME.to_string(),
                    role: Role::Admin,
                    contact_info: String::new(),
                    registered_at: now,
                })?;
                Ok(None)
            }
        }
    }

    /// Strip the role from `actor`. Returns the record it replaced.
    fn demote(actors: &ActorLedger, actor: ActorId) -> RegistryResult<ActorProfile> {
        let row = actors
            .get(actor)?
            .ok_or(RegistryError::NotFound { actor })?;
        let previous = row.record.clone();
        let demoted = ActorProfile {
            role: Role::Unregistered,
            ..row.record
        };
        actors.compare_and_swap(row.version, demoted)?;
        Ok(previous)
    }

    /// Put back a record overwritten earlier in the same operation.
    fn restore(actors: &ActorLedger, previous: ActorProfile) -> Result<(), LedgerError> {
        match actors.get(previous.id)? {
            Some(row) => actors.compare_and_swap(row.version, previous).map(|_| ()),
            None => actors.insert(previous).map(|_| ()),
        }
    }

    /// Turn a lost write race into the most specific error.
    fn refine_lost_race(&self, actor: ActorId, err: LedgerError) -> RegistryError {
        if !(err.is_conflict() || matches!(err, LedgerError::DuplicateKey { .. })) {
            return err.into();
        }
        match self.actors.find(actor) {
            Ok(Some(current)) if current.role.is_registered() => {
                RegistryError::AlreadyRegistered {
                    actor,
                    role: current.role,
                }
            }
            Ok(_) => err.into(),
            Err(read_err) => read_err.into(),
        }
    }
}

impl IdentityRegistryApi for IdentityRegistry {
    fn register(
        &self,
        actor: ActorId,
        name: &str,
        role: Role,
        contact_info: &str,
    ) -> RegistryResult<ActorProfile> {
        invariant_assignable_role(role)?;
        if actor.is_zero() {
            return Err(RegistryError::ZeroAddress { field: "actor" });
        }
        self.check_profile_text(name, contact_info)?;

        let profile = ActorProfile {
            id: actor,
            name: name.to_string(),
            role,
            contact_info: contact_info.to_string(),
            registered_at: self.clock.now(),
        };

        let written = match self.actors.get(actor)? {
            Some(row) if row.record.role.is_registered() => {
                warn!(
                    actor = %actor,
                    held = %row.record.role,
                    "[ew-01] Registration rejected: already registered"
                );
                return Err(RegistryError::AlreadyRegistered {
                    actor,
                    role: row.record.role,
                });
            }
            Some(row) => self.actors.compare_and_swap(row.version, profile),
            None => self.actors.insert(profile),
        }
        .map_err(|err| self.refine_lost_race(actor, err))?;

        info!("[ew-01] Actor {} registered as {}", actor, role);
        Ok(written.record)
    }

    fn get_by_role(&self, actor: ActorId, expected: Role) -> RegistryResult<ActorProfile> {
        let profile = self
            .actors
            .find(actor)?
            .ok_or(AccessDenied::NotRegistered { actor })?;
        require_role(&profile, expected)?;
        debug!(actor = %actor, role = %expected, "[ew-01] Role check passed");
        Ok(profile)
    }

    fn change_admin(&self, caller: ActorId, new_admin: ActorId) -> RegistryResult<AdminChange> {
        let mut seat = self.admin.write();
        if caller != *seat {
            warn!(caller = %caller, "[ew-01] change_admin rejected: caller is not admin");
            return Err(RegistryError::NotAdmin { caller });
        }
        if new_admin.is_zero() {
            return Err(RegistryError::ZeroAddress { field: "new_admin" });
        }
        if new_admin == caller {
            debug!(admin = %caller, "[ew-01] change_admin to sitting admin is a no-op");
            return Ok(AdminChange {
                previous: caller,
                current: caller,
            });
        }

        let demoted = Self::demote(self.actors.as_ref(), caller)?;
        if let Err(err) = Self::promote(self.actors.as_ref(), self.clock.now(), new_admin) {
            if let Err(undo) = Self::restore(self.actors.as_ref(), demoted) {
                error!(
                    admin = %caller,
                    error = %undo,
                    "[ew-01] Failed to restore admin record after aborted handover"
                );
            }
            warn!(new_admin = %new_admin, error = %err, "[ew-01] Admin handover aborted");
            return Err(err);
        }

        *seat = new_admin;
        info!("[ew-01] Admin seat moved from {} to {}", caller, new_admin);
        Ok(AdminChange {
            previous: caller,
            current: new_admin,
        })
    }

    fn assign_role(
        &self,
        caller: ActorId,
        actor: ActorId,
        name: &str,
        role: Role,
        contact_info: &str,
    ) -> RegistryResult<ActorProfile> {
        let seat = self.admin.read();
        if caller != *seat {
            warn!(caller = %caller, "[ew-01] assign_role rejected: caller is not admin");
            return Err(RegistryError::NotAdmin { caller });
        }
        invariant_assignable_role(role)?;
        if actor.is_zero() {
            return Err(RegistryError::ZeroAddress { field: "actor" });
        }
        if actor == *seat {
            return Err(RegistryError::AdminSeatProtected { actor });
        }
        self.check_profile_text(name, contact_info)?;

        let profile = ActorProfile {
            id: actor,
            name: name.to_string(),
            role,
            contact_info: contact_info.to_string(),
            registered_at: self.clock.now(),
        };
        let written = match self.actors.get(actor)? {
            Some(row) => self.actors.compare_and_swap(row.version, profile)?,
            None => self.actors.insert(profile)?,
        };

        info!("[ew-01] Admin {} assigned {} to {}", caller, role, actor);
        Ok(written.record)
    }

    fn admin(&self) -> ActorId {
        *self.admin.read()
    }

    fn profile(&self, actor: ActorId) -> RegistryResult<ActorProfile> {
        self.actors
            .find(actor)?
            .ok_or(RegistryError::NotFound { actor })
    }

    fn list_by_role(&self, role: Role) -> RegistryResult<Vec<ActorProfile>> {
        let found = self.actors.filter(&|p: &ActorProfile| p.role == role)?;
        debug!(role = %role, count = found.len(), "[ew-01] Listed actors by role");
        Ok(found)
    }
}
