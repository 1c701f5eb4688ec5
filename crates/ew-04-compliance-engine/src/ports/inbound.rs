//! Driving Ports (API - Inbound)

use shared_types::{ActorProfile, WasteId};

use crate::domain::{
    Audit, AuditReceipt, CaseUpdate, Certificate, CertificateEligibility, ComplianceResult,
    IssueCertificateRequest, NonComplianceFilter, NonComplianceRecord, SubmitAuditRequest,
};

/// Primary Compliance Engine API.
pub trait ComplianceEngineApi: Send + Sync {
    /// Record an audit. A `NonCompliant` audit also opens a case against
    /// the waste item's producer; both are written or neither is.
    fn submit_audit(
        &self,
        regulator: &ActorProfile,
        request: SubmitAuditRequest,
    ) -> ComplianceResult<AuditReceipt>;

    /// Issue a certificate for a processed waste item with a compliant audit.
    fn issue_certificate(
        &self,
        regulator: &ActorProfile,
        request: IssueCertificateRequest,
    ) -> ComplianceResult<Certificate>;

    /// Move a non-compliance case forward.
    fn resolve_non_compliance(
        &self,
        regulator: &ActorProfile,
        update: CaseUpdate,
    ) -> ComplianceResult<NonComplianceRecord>;

    /// Audits of one waste item, oldest first.
    fn audits_for(&self, waste_id: WasteId) -> ComplianceResult<Vec<Audit>>;

    /// Every audit, oldest first.
    fn list_audits(&self) -> ComplianceResult<Vec<Audit>>;

    /// Every certificate, oldest first.
    fn list_certificates(&self) -> ComplianceResult<Vec<Certificate>>;

    /// Certificates of one waste item.
    fn certificates_for(&self, waste_id: WasteId) -> ComplianceResult<Vec<Certificate>>;

    /// Non-compliance cases matching `filter`.
    fn list_non_compliance(
        &self,
        filter: NonComplianceFilter,
    ) -> ComplianceResult<Vec<NonComplianceRecord>>;

    /// Which certificate gates the waste item meets.
    fn eligibility(&self, waste_id: WasteId) -> ComplianceResult<CertificateEligibility>;
}
