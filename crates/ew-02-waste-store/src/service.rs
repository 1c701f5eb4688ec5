//! Waste Item Store Service - Core business logic

use shared_types::{
    require_role, ActorId, ActorProfile, LedgerError, Role, TimeSource, WasteId, WasteItem,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{
    deadline_from, validate_request, LogWasteRequest, WasteError, WasteResult, WasteStoreConfig,
};
use crate::ports::{WasteLedger, WasteStoreApi};

/// Waste Item Store implementation.
pub struct WasteStore {
    config: WasteStoreConfig,
    items: Arc<WasteLedger>,
    clock: Arc<dyn TimeSource>,
}

impl WasteStore {
    /// Create the store over the waste item table.
    pub fn new(
        config: WasteStoreConfig,
        items: Arc<WasteLedger>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            items,
            clock,
        }
    }

    /// Turn a lost swap into `AlreadyProcessed` when the winner processed it.
    fn refine_lost_race(&self, waste_id: WasteId, err: LedgerError) -> WasteError {
        if !err.is_conflict() {
            return err.into();
        }
        match self.items.find(waste_id) {
            Ok(Some(current)) if current.is_processed => WasteError::AlreadyProcessed {
                waste_id,
                processed_by: current.processed_by,
            },
            Ok(_) => err.into(),
            Err(read_err) => read_err.into(),
        }
    }

    fn scan_where(&self, predicate: &dyn Fn(&WasteItem) -> bool) -> WasteResult<Vec<WasteItem>> {
        Ok(self.items.filter(predicate)?)
    }
}

impl WasteStoreApi for WasteStore {
    fn log_waste(
        &self,
        producer: &ActorProfile,
        request: LogWasteRequest,
    ) -> WasteResult<WasteItem> {
        require_role(producer, Role::Producer)?;
        validate_request(&request, &self.config)?;

        let now = self.clock.now();
        let deadline = deadline_from(now, request.deadline_days)?;
        let id = WasteId(self.items.next_sequence()?);

        let item = WasteItem {
            id,
            producer: producer.id,
            waste_type: request.waste_type,
            origin: request.origin,
            quantity: request.quantity,
            description: request.description,
            evidence_ref: request.evidence_ref,
            logged_at: now,
            deadline,
            is_processed: false,
            processed_by: None,
            processed_at: None,
        };
        let row = self.items.insert(item)?;

        info!(
            "[ew-02] Waste item {} logged by {} (quantity {}, due {})",
            id, producer.id, row.record.quantity, deadline
        );
        Ok(row.record)
    }

    fn mark_processed(
        &self,
        recycler: &ActorProfile,
        waste_id: WasteId,
    ) -> WasteResult<WasteItem> {
        require_role(recycler, Role::Recycler)?;

        let row = self
            .items
            .get(waste_id)?
            .ok_or(WasteError::NotFound { waste_id })?;
        if row.record.is_processed {
            warn!(waste_id = %waste_id, "[ew-02] mark_processed rejected: already processed");
            return Err(WasteError::AlreadyProcessed {
                waste_id,
                processed_by: row.record.processed_by,
            });
        }

        let processed = WasteItem {
            is_processed: true,
            processed_by: Some(recycler.id),
            processed_at: Some(self.clock.now()),
            ..row.record
        };
        let written = self
            .items
            .compare_and_swap(row.version, processed)
            .map_err(|err| self.refine_lost_race(waste_id, err))?;

        info!("[ew-02] Waste item {} processed by {}", waste_id, recycler.id);
        Ok(written.record)
    }

    fn list_by_producer(&self, producer: ActorId) -> WasteResult<Vec<WasteItem>> {
        let items = self.scan_where(&|item| item.producer == producer)?;
        debug!(producer = %producer, count = items.len(), "[ew-02] Listed by producer");
        Ok(items)
    }

    fn list_unprocessed(&self) -> WasteResult<Vec<WasteItem>> {
        self.scan_where(&|item| !item.is_processed)
    }

    fn get(&self, waste_id: WasteId) -> WasteResult<WasteItem> {
        self.items
            .find(waste_id)?
            .ok_or(WasteError::NotFound { waste_id })
    }

    fn list_all(&self) -> WasteResult<Vec<WasteItem>> {
        self.scan_where(&|_| true)
    }

    fn list_overdue(&self) -> WasteResult<Vec<WasteItem>> {
        let now = self.clock.now();
        self.scan_where(&|item| item.is_overdue(now))
    }
}
