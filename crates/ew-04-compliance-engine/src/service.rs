//! Compliance Engine Service - Core business logic

use shared_types::{
    check_text, require_role, ActorProfile, AuditId, CertificateId, FieldViolation, Ledger,
    NonComplianceId, Role, TimeSource, Versioned, WasteId, WasteItem,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::{
    invariant_case_transition, invariant_certificate_eligible, Audit, AuditReceipt, AuditStatus,
    CaseUpdate, Certificate, CertificateEligibility, ComplianceConfig, ComplianceError,
    ComplianceResult, IssueCertificateRequest, NonComplianceFilter, NonComplianceRecord,
    NonComplianceStatus, SubmitAuditRequest,
};
use crate::ports::{AuditLedger, CertificateLedger, ComplianceEngineApi, NonComplianceLedger};

/// Compliance Engine implementation.
pub struct ComplianceEngine {
    config: ComplianceConfig,
    audits: Arc<AuditLedger>,
    cases: Arc<NonComplianceLedger>,
    certificates: Arc<CertificateLedger>,
    waste: Arc<dyn Ledger<WasteItem>>,
    clock: Arc<dyn TimeSource>,
}

impl ComplianceEngine {
    /// Create the engine. `waste` is only read.
    pub fn new(
        config: ComplianceConfig,
        audits: Arc<AuditLedger>,
        cases: Arc<NonComplianceLedger>,
        certificates: Arc<CertificateLedger>,
        waste: Arc<dyn Ledger<WasteItem>>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            audits,
            cases,
            certificates,
            waste,
            clock,
        }
    }

    fn waste_item(&self, waste_id: WasteId) -> ComplianceResult<WasteItem> {
        self.waste
            .find(waste_id)?
            .ok_or(ComplianceError::WasteNotFound { waste_id })
    }

    fn check_text_fields(&self, details: &str, evidence_ref: &str) -> ComplianceResult<()> {
        check_text("details", details, self.config.max_text_len, false)?;
        check_text("evidence_ref", evidence_ref, self.config.max_text_len, false)?;
        Ok(())
    }

    /// Open the case for a `NonCompliant` audit that is already stored.
    fn open_case(
        &self,
        audit: &Audit,
        responsible: &WasteItem,
    ) -> ComplianceResult<NonComplianceRecord> {
        let record = NonComplianceRecord {
            id: NonComplianceId(self.cases.next_sequence()?),
            waste_id: audit.waste_id,
            audit_id: audit.id,
            details: audit.details.clone(),
            responsible: responsible.producer,
            reported_by: audit.auditor,
            reported_at: audit.audited_at,
            status: NonComplianceStatus::Open,
            updated_at: audit.audited_at,
        };
        Ok(self.cases.insert(record)?.into_record())
    }

    /// Undo an audit whose case could not be written.
    fn retract_orphan(&self, audit_id: AuditId, cause: &ComplianceError) {
        match self.audits.retract(audit_id) {
            Ok(()) => warn!(
                audit_id = %audit_id,
                error = %cause,
                "[ew-04] Non-compliance case failed, audit retracted"
            ),
            Err(undo) => error!(
                audit_id = %audit_id,
                error = %cause,
                retract_error = %undo,
                "[ew-04] Non-compliance case failed and audit could not be retracted"
            ),
        }
    }

    fn compute_eligibility(&self, waste: &WasteItem) -> ComplianceResult<CertificateEligibility> {
        let waste_id = waste.id;
        let compliant_audits = self
            .audits
            .filter(&|a: &Audit| a.waste_id == waste_id && a.status == AuditStatus::Compliant)?
            .len();
        Ok(CertificateEligibility {
            waste_id,
            processed: waste.is_processed,
            compliant_audits,
        })
    }

    fn load_case(
        &self,
        record_id: NonComplianceId,
    ) -> ComplianceResult<Versioned<NonComplianceRecord>> {
        self.cases
            .get(record_id)?
            .ok_or(ComplianceError::RecordNotFound { record_id })
    }
}

impl ComplianceEngineApi for ComplianceEngine {
    fn submit_audit(
        &self,
        regulator: &ActorProfile,
        request: SubmitAuditRequest,
    ) -> ComplianceResult<AuditReceipt> {
        require_role(regulator, Role::Regulator)?;
        self.check_text_fields(&request.details, &request.evidence_ref)?;
        let waste = self.waste_item(request.waste_id)?;

        let audit = Audit {
            id: AuditId(self.audits.next_sequence()?),
            waste_id: waste.id,
            status: request.status,
            details: request.details,
            evidence_ref: request.evidence_ref,
            auditor: regulator.id,
            audited_at: self.clock.now(),
        };
        let audit = self.audits.insert(audit)?.into_record();

        let non_compliance = match audit.status {
            AuditStatus::NonCompliant => match self.open_case(&audit, &waste) {
                Ok(record) => Some(record),
                Err(err) => {
                    self.retract_orphan(audit.id, &err);
                    return Err(err);
                }
            },
            AuditStatus::Compliant | AuditStatus::Warning => None,
        };

        info!(
            "[ew-04] Audit {} recorded for waste {}: {}",
            audit.id, audit.waste_id, audit.status
        );
        if let Some(record) = &non_compliance {
            info!(
                "[ew-04] Non-compliance case {} opened against {}",
                record.id, record.responsible
            );
        }
        Ok(AuditReceipt {
            audit,
            non_compliance,
        })
    }

    fn issue_certificate(
        &self,
        regulator: &ActorProfile,
        request: IssueCertificateRequest,
    ) -> ComplianceResult<Certificate> {
        require_role(regulator, Role::Regulator)?;
        check_text("details", &request.details, self.config.max_text_len, false)?;
        if request.recipient.is_zero() {
            return Err(FieldViolation::new("recipient", "zero address").into());
        }

        let waste = self.waste_item(request.waste_id)?;
        let eligibility = self.compute_eligibility(&waste)?;
        if let Err(err) = invariant_certificate_eligible(&eligibility) {
            warn!(waste_id = %waste.id, error = %err, "[ew-04] Certificate refused");
            return Err(err);
        }

        let certificate = Certificate {
            id: CertificateId(self.certificates.next_sequence()?),
            waste_id: waste.id,
            certificate_type: request.certificate_type,
            details: request.details,
            recipient: request.recipient,
            issuer: regulator.id,
            issued_at: self.clock.now(),
        };
        let certificate = self.certificates.insert(certificate)?.into_record();

        info!(
            "[ew-04] {} certificate {} issued for waste {} to {}",
            certificate.certificate_type, certificate.id, certificate.waste_id, certificate.recipient
        );
        Ok(certificate)
    }

    fn resolve_non_compliance(
        &self,
        regulator: &ActorProfile,
        update: CaseUpdate,
    ) -> ComplianceResult<NonComplianceRecord> {
        require_role(regulator, Role::Regulator)?;

        let row = self.load_case(update.record_id)?;
        let from = row.record.status;
        invariant_case_transition(update.record_id, from, update.status)?;

        let next = NonComplianceRecord {
            status: update.status,
            updated_at: self.clock.now(),
            ..row.record
        };
        let written = match self.cases.compare_and_swap(row.version, next) {
            Ok(written) => written,
            Err(err) if err.is_conflict() => {
                let latest = self.load_case(update.record_id)?;
                invariant_case_transition(update.record_id, latest.record.status, update.status)?;
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            "[ew-04] Non-compliance case {} moved {} -> {}",
            written.record.id, from, written.record.status
        );
        Ok(written.record)
    }

    fn audits_for(&self, waste_id: WasteId) -> ComplianceResult<Vec<Audit>> {
        let audits = self.audits.filter(&|a: &Audit| a.waste_id == waste_id)?;
        debug!(waste_id = %waste_id, count = audits.len(), "[ew-04] Listed audits");
        Ok(audits)
    }

    fn list_audits(&self) -> ComplianceResult<Vec<Audit>> {
        Ok(self.audits.filter(&|_| true)?)
    }

    fn list_certificates(&self) -> ComplianceResult<Vec<Certificate>> {
        Ok(self.certificates.filter(&|_| true)?)
    }

    fn certificates_for(&self, waste_id: WasteId) -> ComplianceResult<Vec<Certificate>> {
        Ok(self
            .certificates
            .filter(&|c: &Certificate| c.waste_id == waste_id)?)
    }

    fn list_non_compliance(
        &self,
        filter: NonComplianceFilter,
    ) -> ComplianceResult<Vec<NonComplianceRecord>> {
        Ok(self.cases.filter(&|r| filter.matches(r))?)
    }

    fn eligibility(&self, waste_id: WasteId) -> ComplianceResult<CertificateEligibility> {
        let waste = self.waste_item(waste_id)?;
        self.compute_eligibility(&waste)
    }
}
