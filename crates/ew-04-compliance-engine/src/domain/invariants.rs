//! # Domain Invariants

use shared_types::NonComplianceId;

use super::entities::NonComplianceStatus;
use super::errors::ComplianceError;
use super::value_objects::CertificateEligibility;

/// Invariant: a certificate needs a processed item and a compliant audit.
///
/// The processing gate is checked first, so an item failing both reports
/// `NotProcessed`.
pub fn invariant_certificate_eligible(
    eligibility: &CertificateEligibility,
) -> Result<(), ComplianceError> {
    if !eligibility.processed {
        return Err(ComplianceError::NotProcessed {
            waste_id: eligibility.waste_id,
        });
    }
    if eligibility.compliant_audits == 0 {
        return Err(ComplianceError::NoCompliantAudit {
            waste_id: eligibility.waste_id,
        });
    }
    Ok(())
}

/// Invariant: cases move strictly forward, `Open → InProgress → Resolved`.
///
/// Skipping `InProgress` is allowed. Repeating the current status is not.
pub fn invariant_case_transition(
    record_id: NonComplianceId,
    from: NonComplianceStatus,
    to: NonComplianceStatus,
) -> Result<(), ComplianceError> {
    if to.rank() > from.rank() {
        Ok(())
    } else {
        Err(ComplianceError::InvalidTransition { record_id, from, to })
    }
}
