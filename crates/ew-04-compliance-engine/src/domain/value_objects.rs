//! # Value Objects

use serde::{Deserialize, Serialize};
use shared_types::{ActorId, NonComplianceId, WasteId};

use super::entities::{
    Audit, AuditStatus, CertificateType, NonComplianceRecord, NonComplianceStatus,
};

/// Compliance engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Upper bound for free-text fields, in bytes.
    pub max_text_len: usize,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self { max_text_len: 4096 }
    }
}

/// Input to `submit_audit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAuditRequest {
    pub waste_id: WasteId,
    pub status: AuditStatus,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub evidence_ref: String,
}

/// Input to `issue_certificate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCertificateRequest {
    pub waste_id: WasteId,
    pub recipient: ActorId,
    pub certificate_type: CertificateType,
    #[serde(default)]
    pub details: String,
}

/// Input to `resolve_non_compliance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseUpdate {
    pub record_id: NonComplianceId,
    pub status: NonComplianceStatus,
}

/// Everything `submit_audit` committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReceipt {
    pub audit: Audit,
    /// Present when the audit was `NonCompliant`.
    pub non_compliance: Option<NonComplianceRecord>,
}

/// Selects non-compliance records. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonComplianceFilter {
    #[serde(default)]
    pub status: Option<NonComplianceStatus>,
    #[serde(default)]
    pub responsible: Option<ActorId>,
}

impl NonComplianceFilter {
    pub fn matches(&self, record: &NonComplianceRecord) -> bool {
        self.status.map_or(true, |s| record.status == s)
            && self.responsible.map_or(true, |r| record.responsible == r)
    }
}

/// Which certificate gates a waste item currently meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateEligibility {
    pub waste_id: WasteId,
    pub processed: bool,
    pub compliant_audits: usize,
}

impl CertificateEligibility {
    /// Both gates met.
    pub fn is_eligible(&self) -> bool {
        self.processed && self.compliant_audits > 0
    }
}
