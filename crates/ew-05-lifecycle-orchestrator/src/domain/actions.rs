//! # Action Surface
//!
//! One `Action` per operation a UI or CLI may invoke, and the matching
//! `Outcome`. Both are plain serde types so the runtime can speak JSON.

use ew_01_identity_registry::AdminChange;
use ew_02_waste_store::LogWasteRequest;
use ew_03_shipment_tracker::{CreateShipmentRequest, Shipment, ShipmentSummary, StatusUpdate};
use ew_04_compliance_engine::{
    Audit, AuditReceipt, CaseUpdate, Certificate, CertificateEligibility,
    IssueCertificateRequest, NonComplianceFilter, NonComplianceRecord, SubmitAuditRequest,
};
use serde::{Deserialize, Serialize};
use shared_types::{ActorId, ActorProfile, Role, ShipmentId, WasteId, WasteItem};

/// A request from an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // Identity Registry
    Register {
        name: String,
        role: Role,
        #[serde(default)]
        contact_info: String,
    },
    AssignRole {
        actor: ActorId,
        name: String,
        role: Role,
        #[serde(default)]
        contact_info: String,
    },
    ChangeAdmin {
        new_admin: ActorId,
    },
    CurrentAdmin,
    GetProfile {
        actor: ActorId,
    },
    ListActors {
        role: Role,
    },

    // Waste Item Store
    LogWaste(LogWasteRequest),
    MarkProcessed {
        waste_id: WasteId,
    },
    GetWaste {
        waste_id: WasteId,
    },
    ListWaste,
    ListWasteByProducer {
        producer: ActorId,
    },
    ListUnprocessed,
    ListOverdue,

    // Shipment Tracker
    CreateShipment(CreateShipmentRequest),
    UpdateShipment(StatusUpdate),
    GetShipment {
        shipment_id: ShipmentId,
    },
    ListShipments,
    ShipmentSummary,

    // Compliance Engine
    SubmitAudit(SubmitAuditRequest),
    IssueCertificate(IssueCertificateRequest),
    ResolveNonCompliance(CaseUpdate),
    ListAudits {
        #[serde(default)]
        waste_id: Option<WasteId>,
    },
    ListCertificates {
        #[serde(default)]
        waste_id: Option<WasteId>,
    },
    ListNonCompliance(NonComplianceFilter),
    Eligibility {
        waste_id: WasteId,
    },
}

impl Action {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::AssignRole { .. } => "assign_role",
            Self::ChangeAdmin { .. } => "change_admin",
            Self::CurrentAdmin => "current_admin",
            Self::GetProfile { .. } => "get_profile",
            Self::ListActors { .. } => "list_actors",
            Self::LogWaste(_) => "log_waste",
            Self::MarkProcessed { .. } => "mark_processed",
            Self::GetWaste { .. } => "get_waste",
            Self::ListWaste => "list_waste",
            Self::ListWasteByProducer { .. } => "list_waste_by_producer",
            Self::ListUnprocessed => "list_unprocessed",
            Self::ListOverdue => "list_overdue",
            Self::CreateShipment(_) => "create_shipment",
            Self::UpdateShipment(_) => "update_shipment",
            Self::GetShipment { .. } => "get_shipment",
            Self::ListShipments => "list_shipments",
            Self::ShipmentSummary => "shipment_summary",
            Self::SubmitAudit(_) => "submit_audit",
            Self::IssueCertificate(_) => "issue_certificate",
            Self::ResolveNonCompliance(_) => "resolve_non_compliance",
            Self::ListAudits { .. } => "list_audits",
            Self::ListCertificates { .. } => "list_certificates",
            Self::ListNonCompliance(_) => "list_non_compliance",
            Self::Eligibility { .. } => "eligibility",
        }
    }

    /// Whether the action can change ledger state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Register { .. }
                | Self::AssignRole { .. }
                | Self::ChangeAdmin { .. }
                | Self::LogWaste(_)
                | Self::MarkProcessed { .. }
                | Self::CreateShipment(_)
                | Self::UpdateShipment(_)
                | Self::SubmitAudit(_)
                | Self::IssueCertificate(_)
                | Self::ResolveNonCompliance(_)
        )
    }
}

/// The result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    Actor(ActorProfile),
    Actors(Vec<ActorProfile>),
    Admin(ActorId),
    AdminChange(AdminChange),
    Waste(WasteItem),
    WasteItems(Vec<WasteItem>),
    Shipment(Shipment),
    Shipments(Vec<Shipment>),
    ShipmentSummary(ShipmentSummary),
    Audit(AuditReceipt),
    Audits(Vec<Audit>),
    Certificate(Certificate),
    Certificates(Vec<Certificate>),
    NonCompliance(NonComplianceRecord),
    NonComplianceRecords(Vec<NonComplianceRecord>),
    Eligibility(CertificateEligibility),
}
