//! # Domain Entities
//!
//! - `Audit`: append-only assessment of a waste item
//! - `NonComplianceRecord`: case opened by a `NonCompliant` audit
//! - `Certificate`: immutable attestation, never revoked

use serde::{Deserialize, Serialize};
use shared_types::{
    ActorId, AuditId, CertificateId, LedgerRecord, NonComplianceId, Timestamp, WasteId,
};
use std::fmt;

/// Outcome of an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditStatus {
    Compliant,
    NonCompliant,
    Warning,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::NonCompliant => "NonCompliant",
            Self::Warning => "Warning",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A regulator's point-in-time assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub id: AuditId,
    pub waste_id: WasteId,
    pub status: AuditStatus,
    pub details: String,
    pub evidence_ref: String,
    pub auditor: ActorId,
    pub audited_at: Timestamp,
}

impl LedgerRecord for Audit {
    type Id = AuditId;
    const TABLE: &'static str = "audits";

    fn id(&self) -> AuditId {
        self.id
    }
}

/// Progress of a non-compliance case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NonComplianceStatus {
    Open,
    InProgress,
    Resolved,
}

impl NonComplianceStatus {
    /// Position in the case lifecycle.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Open => 0,
            Self::InProgress => 1,
            Self::Resolved => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "InProgress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for NonComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case opened automatically by a `NonCompliant` audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonComplianceRecord {
    pub id: NonComplianceId,
    pub waste_id: WasteId,
    /// Audit that opened the case.
    pub audit_id: AuditId,
    pub details: String,
    /// Producer of the waste item.
    pub responsible: ActorId,
    pub reported_by: ActorId,
    pub reported_at: Timestamp,
    pub status: NonComplianceStatus,
    pub updated_at: Timestamp,
}

impl LedgerRecord for NonComplianceRecord {
    type Id = NonComplianceId;
    const TABLE: &'static str = "non_compliance";

    fn id(&self) -> NonComplianceId {
        self.id
    }
}

/// Kind of attestation a certificate makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateType {
    Recycling,
    Disposal,
    Processing,
    Compliance,
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recycling => "Recycling",
            Self::Disposal => "Disposal",
            Self::Processing => "Processing",
            Self::Compliance => "Compliance",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub waste_id: WasteId,
    pub certificate_type: CertificateType,
    pub details: String,
    pub recipient: ActorId,
    pub issuer: ActorId,
    pub issued_at: Timestamp,
}

impl LedgerRecord for Certificate {
    type Id = CertificateId;
    const TABLE: &'static str = "certificates";

    fn id(&self) -> CertificateId {
        self.id
    }
}
