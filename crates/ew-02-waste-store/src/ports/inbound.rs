//! Driving Ports (API - Inbound)

use shared_types::{ActorId, ActorProfile, WasteId, WasteItem};

use crate::domain::{LogWasteRequest, WasteResult};

/// Primary Waste Item Store API.
///
/// Mutations take the caller's resolved profile and re-check its role.
pub trait WasteStoreApi: Send + Sync {
    /// Log a new waste item. Caller must be a Producer.
    fn log_waste(&self, producer: &ActorProfile, request: LogWasteRequest)
        -> WasteResult<WasteItem>;

    /// Set the processing flag. Caller must be a Recycler.
    fn mark_processed(&self, recycler: &ActorProfile, waste_id: WasteId)
        -> WasteResult<WasteItem>;

    /// Items logged by `producer`, in id order.
    fn list_by_producer(&self, producer: ActorId) -> WasteResult<Vec<WasteItem>>;

    /// Items still awaiting processing, in id order.
    fn list_unprocessed(&self) -> WasteResult<Vec<WasteItem>>;

    /// One item by id.
    fn get(&self, waste_id: WasteId) -> WasteResult<WasteItem>;

    /// Every item, in id order.
    fn list_all(&self) -> WasteResult<Vec<WasteItem>>;

    /// Unprocessed items whose deadline has passed.
    fn list_overdue(&self) -> WasteResult<Vec<WasteItem>>;
}
