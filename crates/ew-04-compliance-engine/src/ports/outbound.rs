//! Driven Ports (SPI - Outbound)
//!
//! One ledger table per entity. The waste item table is injected read-only.

use shared_types::Ledger;

use crate::domain::{Audit, Certificate, NonComplianceRecord};

/// Audit table.
pub type AuditLedger = dyn Ledger<Audit>;

/// Non-compliance case table.
pub type NonComplianceLedger = dyn Ledger<NonComplianceRecord>;

/// Certificate table.
pub type CertificateLedger = dyn Ledger<Certificate>;
