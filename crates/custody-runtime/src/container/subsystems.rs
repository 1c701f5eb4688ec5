//! # Subsystem Container
//!
//! Holds every ledger table and subsystem instance.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Ledger tables (restored from snapshot when one exists)
//! Level 1: Identity Registry (bootstraps or restores the admin seat)
//! Level 2: Waste Store
//! Level 3: Shipment Tracker, Compliance Engine (read the waste table)
//! Level 4: Lifecycle Orchestrator (drives 1-4, publishes to the bus)
//! ```
//!
//! Ledgers are restored before the registry is built, so a snapshot's admin
//! wins over the configured bootstrap admin.

use std::sync::Arc;

use ew_01_identity_registry::{IdentityRegistry, RegistryError};
use ew_02_waste_store::WasteStore;
use ew_03_shipment_tracker::{Shipment, ShipmentTracker};
use ew_04_compliance_engine::{Audit, Certificate, ComplianceEngine, NonComplianceRecord};
use ew_05_lifecycle_orchestrator::LifecycleOrchestrator;
use shared_bus::InMemoryEventBus;
use shared_types::{ActorProfile, InMemoryLedger, TimeSource, WasteItem};
use tracing::{info, instrument};

use crate::container::config::RuntimeConfig;
use crate::snapshot::{CustodySnapshot, SNAPSHOT_FORMAT_VERSION};

/// Every ledger table, kept concrete so it can be exported.
#[derive(Default)]
pub struct LedgerTables {
    pub actors: Arc<InMemoryLedger<ActorProfile>>,
    pub waste_items: Arc<InMemoryLedger<WasteItem>>,
    pub shipments: Arc<InMemoryLedger<Shipment>>,
    pub audits: Arc<InMemoryLedger<Audit>>,
    pub non_compliance: Arc<InMemoryLedger<NonComplianceRecord>>,
    pub certificates: Arc<InMemoryLedger<Certificate>>,
}

impl LedgerTables {
    /// Replace every table with the snapshot's contents.
    pub fn restore(&self, snapshot: CustodySnapshot) {
        self.actors.import(snapshot.actors);
        self.waste_items.import(snapshot.waste_items);
        self.shipments.import(snapshot.shipments);
        self.audits.import(snapshot.audits);
        self.non_compliance.import(snapshot.non_compliance);
        self.certificates.import(snapshot.certificates);
    }

    /// Copy every table out.
    pub fn export(&self, saved_at: u64) -> CustodySnapshot {
        CustodySnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            saved_at,
            actors: self.actors.export(),
            waste_items: self.waste_items.export(),
            shipments: self.shipments.export(),
            audits: self.audits.export(),
            non_compliance: self.non_compliance.export(),
            certificates: self.certificates.export(),
        }
    }
}

/// Central container holding all subsystem instances.
pub struct CustodyContainer {
    /// Runtime configuration.
    pub config: RuntimeConfig,
    /// Ledger tables shared by the subsystems.
    pub tables: LedgerTables,
    /// Event bus the orchestrator publishes to.
    pub bus: Arc<InMemoryEventBus>,
    /// Identity Registry (Subsystem 1).
    pub registry: Arc<IdentityRegistry>,
    /// Lifecycle Orchestrator (Subsystem 5). The only entry point for actions.
    pub orchestrator: Arc<LifecycleOrchestrator>,
    clock: Arc<dyn TimeSource>,
}

impl CustodyContainer {
    /// Wire every subsystem.
    ///
    /// # Errors
    ///
    /// Fails if the registry cannot seat an admin (zero bootstrap admin, or a
    /// restored actor table without exactly one admin).
    #[instrument(skip_all)]
    pub fn new(
        config: RuntimeConfig,
        clock: Arc<dyn TimeSource>,
        snapshot: Option<CustodySnapshot>,
    ) -> Result<Self, RegistryError> {
        // Level 0
        let tables = LedgerTables::default();
        if let Some(snapshot) = snapshot {
            tables.restore(snapshot);
            info!(
                actors = tables.actors.len(),
                waste_items = tables.waste_items.len(),
                "Ledgers restored"
            );
        }

        // Level 1
        let registry = Arc::new(IdentityRegistry::new(
            config.registry.clone(),
            tables.actors.clone(),
            clock.clone(),
            config.admin,
        )?);

        // Level 2
        let waste = Arc::new(WasteStore::new(
            config.waste.clone(),
            tables.waste_items.clone(),
            clock.clone(),
        ));

        // Level 3
        let shipments = Arc::new(ShipmentTracker::new(
            config.shipments.clone(),
            tables.shipments.clone(),
            tables.waste_items.clone(),
            clock.clone(),
        ));
        let compliance = Arc::new(ComplianceEngine::new(
            config.compliance.clone(),
            tables.audits.clone(),
            tables.non_compliance.clone(),
            tables.certificates.clone(),
            tables.waste_items.clone(),
            clock.clone(),
        ));

        // Level 4
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
        let orchestrator = Arc::new(LifecycleOrchestrator::new(
            registry.clone(),
            waste,
            shipments,
            compliance,
            bus.clone(),
            clock.clone(),
        ));

        info!("All custody subsystems wired");
        Ok(Self {
            config,
            tables,
            bus,
            registry,
            orchestrator,
            clock,
        })
    }

    /// Export every table, stamped with the current time.
    pub fn snapshot(&self) -> CustodySnapshot {
        self.tables.export(self.clock.now())
    }
}
