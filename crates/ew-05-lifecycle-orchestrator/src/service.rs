//! Lifecycle Orchestrator Service - Authorize, delegate, publish

use ew_01_identity_registry::AdminChange;
use ew_02_waste_store::LogWasteRequest;
use ew_03_shipment_tracker::{CreateShipmentRequest, Shipment, ShipmentTransition, StatusUpdate};
use ew_04_compliance_engine::{
    AuditReceipt, CaseUpdate, Certificate, IssueCertificateRequest, NonComplianceRecord,
    SubmitAuditRequest,
};
use shared_bus::{BusMessage, CustodyEvent};
use shared_types::{ActorId, ActorProfile, HasErrorKind, Role, TimeSource, WasteId, WasteItem};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{Action, LifecycleResult, Outcome};
use crate::ports::{
    ComplianceEngineApi, EventPublisher, IdentityRegistryApi, LifecycleApi, ShipmentTrackerApi,
    WasteStoreApi,
};

/// Lifecycle Orchestrator implementation.
///
/// Holds no state beyond its collaborators. Every mutation runs through one
/// role check, one delegated call and, on success, one or two events.
pub struct LifecycleOrchestrator {
    registry: Arc<dyn IdentityRegistryApi>,
    waste: Arc<dyn WasteStoreApi>,
    shipments: Arc<dyn ShipmentTrackerApi>,
    compliance: Arc<dyn ComplianceEngineApi>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn TimeSource>,
}

impl LifecycleOrchestrator {
    pub fn new(
        registry: Arc<dyn IdentityRegistryApi>,
        waste: Arc<dyn WasteStoreApi>,
        shipments: Arc<dyn ShipmentTrackerApi>,
        compliance: Arc<dyn ComplianceEngineApi>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            registry,
            waste,
            shipments,
            compliance,
            events,
            clock,
        }
    }

    /// Resolve the caller under `role`. The only registry read per call.
    fn authorize(&self, caller: ActorId, role: Role) -> LifecycleResult<ActorProfile> {
        Ok(self.registry.get_by_role(caller, role)?)
    }

    fn publish(&self, caller: ActorId, event: CustodyEvent) {
        let receivers = self
            .events
            .publish(BusMessage::new(event, caller, self.clock.now()));
        debug!(receivers, "[ew-05] Event published");
    }

    // =========================================================================
    // IDENTITY
    // =========================================================================

    /// Self-service registration. No role is needed to register.
    pub fn register(
        &self,
        caller: ActorId,
        name: &str,
        role: Role,
        contact_info: &str,
    ) -> LifecycleResult<ActorProfile> {
        let profile = self.registry.register(caller, name, role, contact_info)?;
        self.publish(
            caller,
            CustodyEvent::ActorRegistered {
                actor: profile.id,
                role: profile.role,
                assigned_by: None,
            },
        );
        Ok(profile)
    }

    /// Admin-mediated registration. The registry checks the admin seat.
    pub fn assign_role(
        &self,
        caller: ActorId,
        actor: ActorId,
        name: &str,
        role: Role,
        contact_info: &str,
    ) -> LifecycleResult<ActorProfile> {
        let profile = self
            .registry
            .assign_role(caller, actor, name, role, contact_info)?;
        self.publish(
            caller,
            CustodyEvent::ActorRegistered {
                actor: profile.id,
                role: profile.role,
                assigned_by: Some(caller),
            },
        );
        Ok(profile)
    }

    pub fn change_admin(&self, caller: ActorId, new_admin: ActorId) -> LifecycleResult<AdminChange> {
        let change = self.registry.change_admin(caller, new_admin)?;
        if change.changed() {
            self.publish(
                caller,
                CustodyEvent::AdminChanged {
                    previous: change.previous,
                    current: change.current,
                },
            );
        }
        Ok(change)
    }

    // =========================================================================
    // WASTE
    // =========================================================================

    pub fn log_waste(
        &self,
        caller: ActorId,
        request: LogWasteRequest,
    ) -> LifecycleResult<WasteItem> {
        let producer = self.authorize(caller, Role::Producer)?;
        let item = self.waste.log_waste(&producer, request)?;
        self.publish(
            caller,
            CustodyEvent::WasteLogged {
                waste_id: item.id,
                producer: item.producer,
                deadline: item.deadline,
            },
        );
        Ok(item)
    }

    pub fn mark_processed(&self, caller: ActorId, waste_id: WasteId) -> LifecycleResult<WasteItem> {
        let recycler = self.authorize(caller, Role::Recycler)?;
        let item = self.waste.mark_processed(&recycler, waste_id)?;
        self.publish(
            caller,
            CustodyEvent::WasteProcessed {
                waste_id: item.id,
                recycler: recycler.id,
            },
        );
        Ok(item)
    }

    // =========================================================================
    // SHIPMENTS
    // =========================================================================

    pub fn create_shipment(
        &self,
        caller: ActorId,
        request: CreateShipmentRequest,
    ) -> LifecycleResult<Shipment> {
        let transporter = self.authorize(caller, Role::Logistics)?;
        let shipment = self.shipments.create(&transporter, request)?;
        self.publish(
            caller,
            CustodyEvent::ShipmentCreated {
                shipment_id: shipment.id,
                waste_id: shipment.waste_id,
                transporter: shipment.transporter,
            },
        );
        Ok(shipment)
    }

    pub fn update_shipment(
        &self,
        caller: ActorId,
        update: StatusUpdate,
    ) -> LifecycleResult<ShipmentTransition> {
        let transporter = self.authorize(caller, Role::Logistics)?;
        let transition = self.shipments.update_status(&transporter, update)?;
        self.publish(
            caller,
            CustodyEvent::ShipmentStatusChanged {
                shipment_id: transition.shipment.id,
                from: transition.from.as_str().to_string(),
                to: transition.shipment.status.as_str().to_string(),
                location: transition.shipment.location.clone(),
            },
        );
        Ok(transition)
    }

    // =========================================================================
    // COMPLIANCE
    // =========================================================================

    pub fn submit_audit(
        &self,
        caller: ActorId,
        request: SubmitAuditRequest,
    ) -> LifecycleResult<AuditReceipt> {
        let regulator = self.authorize(caller, Role::Regulator)?;
        let receipt = self.compliance.submit_audit(&regulator, request)?;
        self.publish(
            caller,
            CustodyEvent::AuditRecorded {
                audit_id: receipt.audit.id,
                waste_id: receipt.audit.waste_id,
                status: receipt.audit.status.as_str().to_string(),
            },
        );
        if let Some(case) = &receipt.non_compliance {
            self.publish(
                caller,
                CustodyEvent::NonComplianceOpened {
                    record_id: case.id,
                    waste_id: case.waste_id,
                    responsible: case.responsible,
                },
            );
        }
        Ok(receipt)
    }

    pub fn issue_certificate(
        &self,
        caller: ActorId,
        request: IssueCertificateRequest,
    ) -> LifecycleResult<Certificate> {
        let regulator = self.authorize(caller, Role::Regulator)?;
        let certificate = self.compliance.issue_certificate(&regulator, request)?;
        self.publish(
            caller,
            CustodyEvent::CertificateIssued {
                certificate_id: certificate.id,
                waste_id: certificate.waste_id,
                recipient: certificate.recipient,
            },
        );
        Ok(certificate)
    }

    pub fn resolve_non_compliance(
        &self,
        caller: ActorId,
        update: CaseUpdate,
    ) -> LifecycleResult<NonComplianceRecord> {
        let regulator = self.authorize(caller, Role::Regulator)?;
        let record = self.compliance.resolve_non_compliance(&regulator, update)?;
        self.publish(
            caller,
            CustodyEvent::NonComplianceUpdated {
                record_id: record.id,
                status: record.status.as_str().to_string(),
            },
        );
        Ok(record)
    }

    /// Route one action to its typed operation.
    fn dispatch(&self, caller: ActorId, action: Action) -> LifecycleResult<Outcome> {
        let outcome = match action {
            Action::Register {
                name,
                role,
                contact_info,
            } => Outcome::Actor(self.register(caller, &name, role, &contact_info)?),
            Action::AssignRole {
                actor,
                name,
                role,
                contact_info,
            } => Outcome::Actor(self.assign_role(caller, actor, &name, role, &contact_info)?),
            Action::ChangeAdmin { new_admin } => {
                Outcome::AdminChange(self.change_admin(caller, new_admin)?)
            }
            Action::CurrentAdmin => Outcome::Admin(self.registry.admin()),
            Action::GetProfile { actor } => Outcome::Actor(self.registry.profile(actor)?),
            Action::ListActors { role } => Outcome::Actors(self.registry.list_by_role(role)?),

            Action::LogWaste(request) => Outcome::Waste(self.log_waste(caller, request)?),
            Action::MarkProcessed { waste_id } => {
                Outcome::Waste(self.mark_processed(caller, waste_id)?)
            }
            Action::GetWaste { waste_id } => Outcome::Waste(self.waste.get(waste_id)?),
            Action::ListWaste => Outcome::WasteItems(self.waste.list_all()?),
            Action::ListWasteByProducer { producer } => {
                Outcome::WasteItems(self.waste.list_by_producer(producer)?)
            }
            Action::ListUnprocessed => Outcome::WasteItems(self.waste.list_unprocessed()?),
            Action::ListOverdue => Outcome::WasteItems(self.waste.list_overdue()?),

            Action::CreateShipment(request) => {
                Outcome::Shipment(self.create_shipment(caller, request)?)
            }
            Action::UpdateShipment(update) => {
                Outcome::Shipment(self.update_shipment(caller, update)?.shipment)
            }
            Action::GetShipment { shipment_id } => {
                Outcome::Shipment(self.shipments.get(shipment_id)?)
            }
            Action::ListShipments => {
                let transporter = self.authorize(caller, Role::Logistics)?;
                Outcome::Shipments(self.shipments.list_by_transporter(&transporter)?)
            }
            Action::ShipmentSummary => {
                let transporter = self.authorize(caller, Role::Logistics)?;
                Outcome::ShipmentSummary(self.shipments.summary(&transporter)?)
            }

            Action::SubmitAudit(request) => Outcome::Audit(self.submit_audit(caller, request)?),
            Action::IssueCertificate(request) => {
                Outcome::Certificate(self.issue_certificate(caller, request)?)
            }
            Action::ResolveNonCompliance(update) => {
                Outcome::NonCompliance(self.resolve_non_compliance(caller, update)?)
            }
            Action::ListAudits { waste_id } => Outcome::Audits(match waste_id {
                Some(waste_id) => self.compliance.audits_for(waste_id)?,
                None => self.compliance.list_audits()?,
            }),
            Action::ListCertificates { waste_id } => Outcome::Certificates(match waste_id {
                Some(waste_id) => self.compliance.certificates_for(waste_id)?,
                None => self.compliance.list_certificates()?,
            }),
            Action::ListNonCompliance(filter) => {
                Outcome::NonComplianceRecords(self.compliance.list_non_compliance(filter)?)
            }
            Action::Eligibility { waste_id } => {
                Outcome::Eligibility(self.compliance.eligibility(waste_id)?)
            }
        };
        Ok(outcome)
    }
}

impl LifecycleApi for LifecycleOrchestrator {
    fn execute(&self, caller: ActorId, action: Action) -> LifecycleResult<Outcome> {
        let name = action.name();
        let mutation = action.is_mutation();

        match self.dispatch(caller, action) {
            Ok(outcome) => {
                if mutation {
                    info!(caller = %caller, action = name, "[ew-05] Action committed");
                } else {
                    debug!(caller = %caller, action = name, "[ew-05] Read served");
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!(
                    caller = %caller,
                    action = name,
                    kind = %err.kind(),
                    "[ew-05] Action rejected: {}",
                    err
                );
                Err(err)
            }
        }
    }
}
