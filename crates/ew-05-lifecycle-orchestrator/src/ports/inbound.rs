//! Driving Ports (API - Inbound)

use shared_types::ActorId;

use crate::domain::{Action, LifecycleResult, Outcome};

/// The action surface.
///
/// `caller` comes from the session collaborator and is trusted as given.
pub trait LifecycleApi: Send + Sync {
    /// Authorize, delegate, publish.
    fn execute(&self, caller: ActorId, action: Action) -> LifecycleResult<Outcome>;
}
