//! # EW-04 Compliance Engine
//!
//! Records audits against waste items, opens non-compliance cases, and
//! gates certificate issuance.
//!
//! **Subsystem ID:** 4
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Rules
//!
//! | Operation | Gate |
//! |-----------|------|
//! | `submit_audit` | Regulator; waste exists |
//! | `issue_certificate` | Regulator; waste processed; at least one `Compliant` audit |
//! | `resolve_non_compliance` | Regulator; `Open → InProgress → Resolved`, forward only |
//!
//! ## Audit Side Effect
//!
//! ```text
//! submit_audit(NonCompliant)
//!     ├── insert Audit
//!     └── insert NonComplianceRecord { responsible: producer, status: Open }
//!             └── on failure: retract Audit, return the error
//! ```
//!
//! Audits are append-only. A later `NonCompliant` audit does not revoke
//! eligibility earned by an earlier `Compliant` one.

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    invariant_case_transition, invariant_certificate_eligible, Audit, AuditReceipt, AuditStatus,
    CaseUpdate, Certificate, CertificateEligibility, CertificateType, ComplianceConfig,
    ComplianceError, ComplianceResult, IssueCertificateRequest, NonComplianceFilter,
    NonComplianceRecord, NonComplianceStatus, SubmitAuditRequest,
};
pub use ports::{AuditLedger, CertificateLedger, ComplianceEngineApi, NonComplianceLedger};
pub use service::ComplianceEngine;
