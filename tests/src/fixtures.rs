//! # Test Fixtures
//!
//! A fully wired custody stack on a manual clock, plus shorthand for the
//! actions most scenarios repeat.

use std::sync::Arc;

use custody_runtime::{CustodyContainer, RuntimeConfig};
use ew_02_waste_store::LogWasteRequest;
use ew_03_shipment_tracker::{
    CreateShipmentRequest, Shipment, ShipmentStatus, ShipmentTransition, StatusUpdate,
};
use ew_04_compliance_engine::{
    AuditReceipt, AuditStatus, Certificate, CertificateType, IssueCertificateRequest,
    SubmitAuditRequest,
};
use ew_05_lifecycle_orchestrator::{LifecycleOrchestrator, LifecycleResult};
use rand::Rng;
use rust_decimal::Decimal;
use shared_bus::{EventFilter, Subscription};
use shared_types::{ActorId, ManualClock, Role, ShipmentId, WasteId, WasteItem};

pub const ADMIN: ActorId = ActorId([0xAD; 20]);
pub const PRODUCER: ActorId = ActorId([0x01; 20]);
pub const RECYCLER: ActorId = ActorId([0x02; 20]);
pub const CARRIER: ActorId = ActorId([0x03; 20]);
pub const REGULATOR: ActorId = ActorId([0x04; 20]);
pub const STRANGER: ActorId = ActorId([0x09; 20]);

/// 2023-11-14T22:13:20Z
pub const GENESIS: u64 = 1_700_000_000;

/// Random non-zero actor address.
pub fn random_actor() -> ActorId {
    let mut bytes: [u8; 20] = rand::thread_rng().gen();
    bytes[0] |= 0x80;
    ActorId(bytes)
}

/// A waste batch with the given quantity and deadline.
pub fn waste_request(quantity: i64, deadline_days: u64) -> LogWasteRequest {
    LogWasteRequest {
        waste_type: "Lithium batteries".into(),
        origin: "Plant A, Line 3".into(),
        quantity: Decimal::new(quantity, 0),
        description: "Mixed laptop packs".into(),
        evidence_ref: "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi".into(),
        deadline_days,
    }
}

/// Fully wired custody stack.
pub struct Harness {
    pub container: CustodyContainer,
    pub clock: Arc<ManualClock>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Empty ledgers with `ADMIN` seated.
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(GENESIS));
        let config = RuntimeConfig {
            admin: ADMIN,
            ..RuntimeConfig::default()
        };
        let container =
            CustodyContainer::new(config, clock.clone(), None).expect("harness wiring");
        Self { container, clock }
    }

    /// `new()` plus one actor per operational role.
    pub fn onboarded() -> Self {
        let harness = Self::new();
        for (actor, role) in [
            (PRODUCER, Role::Producer),
            (RECYCLER, Role::Recycler),
            (CARRIER, Role::Logistics),
            (REGULATOR, Role::Regulator),
        ] {
            harness.register(actor, role);
        }
        harness
    }

    pub fn api(&self) -> &LifecycleOrchestrator {
        &self.container.orchestrator
    }

    pub fn subscribe(&self) -> Subscription {
        self.container.bus.subscribe(EventFilter::all())
    }

    pub fn register(&self, actor: ActorId, role: Role) {
        self.api()
            .register(actor, &format!("{role} {actor}"), role, "ops@example.org")
            .expect("registration");
    }

    /// `PRODUCER` logs 10 units due in 30 days.
    pub fn log_waste(&self) -> WasteItem {
        self.api()
            .log_waste(PRODUCER, waste_request(10, 30))
            .expect("log waste")
    }

    /// `CARRIER` opens a shipment from `PRODUCER` to `RECYCLER`.
    pub fn ship(&self, waste_id: WasteId) -> Shipment {
        self.api()
            .create_shipment(
                CARRIER,
                CreateShipmentRequest {
                    waste_id,
                    producer: PRODUCER,
                    receiver: RECYCLER,
                    tracking_code: format!("TRK-{waste_id}"),
                    location: String::new(),
                    notes: String::new(),
                },
            )
            .expect("create shipment")
    }

    pub fn move_to(
        &self,
        shipment_id: ShipmentId,
        status: ShipmentStatus,
    ) -> LifecycleResult<ShipmentTransition> {
        self.api().update_shipment(
            CARRIER,
            StatusUpdate {
                shipment_id,
                status,
                location: format!("Checkpoint {}", status),
                notes: String::new(),
            },
        )
    }

    pub fn audit(&self, waste_id: WasteId, status: AuditStatus) -> LifecycleResult<AuditReceipt> {
        self.api().submit_audit(
            REGULATOR,
            SubmitAuditRequest {
                waste_id,
                status,
                details: format!("Inspection: {status}"),
                evidence_ref: String::new(),
            },
        )
    }

    pub fn certify(&self, waste_id: WasteId) -> LifecycleResult<Certificate> {
        self.api().issue_certificate(
            REGULATOR,
            IssueCertificateRequest {
                waste_id,
                recipient: RECYCLER,
                certificate_type: CertificateType::Recycling,
                details: "Recovered per R2v3".into(),
            },
        )
    }
}
