//! # Property Tests
//!
//! Randomized action sequences checked against a direct model of the rules:
//!
//! - certificate gates (processed first, then a compliant audit)
//! - shipment status never regresses, terminal is final
//! - an item is processed exactly once
//! - one non-compliance case per non-compliant audit
//! - every mutating action checks the caller's role

#[cfg(test)]
mod tests {
    use crate::fixtures::*;

    use ew_03_shipment_tracker::ShipmentStatus;
    use ew_04_compliance_engine::{AuditStatus, NonComplianceFilter, NonComplianceStatus};
    use ew_05_lifecycle_orchestrator::{Action, LifecycleApi, Outcome};
    use proptest::prelude::*;
    use shared_types::{ErrorKind, HasErrorKind, Role, WasteId};

    // =========================================================================
    // STRATEGIES
    // =========================================================================

    fn arb_audit_status() -> impl Strategy<Value = AuditStatus> {
        prop_oneof![
            Just(AuditStatus::Compliant),
            Just(AuditStatus::NonCompliant),
            Just(AuditStatus::Warning),
        ]
    }

    fn arb_shipment_status() -> impl Strategy<Value = ShipmentStatus> {
        prop::sample::select(ShipmentStatus::ALL.to_vec())
    }

    fn arb_working_role() -> impl Strategy<Value = Option<Role>> {
        prop_oneof![
            Just(None),
            Just(Some(Role::Producer)),
            Just(Some(Role::Recycler)),
            Just(Some(Role::Logistics)),
            Just(Some(Role::Regulator)),
        ]
    }

    #[derive(Debug, Clone)]
    enum Step {
        Process,
        Audit(AuditStatus),
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            1 => Just(Step::Process),
            3 => arb_audit_status().prop_map(Step::Audit),
        ]
    }

    /// A mutating action and the role it needs.
    fn guarded_action(index: usize, waste_id: WasteId) -> (Action, Role) {
        match index % 4 {
            0 => (Action::LogWaste(waste_request(1, 1)), Role::Producer),
            1 => (Action::MarkProcessed { waste_id }, Role::Recycler),
            2 => (
                Action::SubmitAudit(ew_04_compliance_engine::SubmitAuditRequest {
                    waste_id,
                    status: AuditStatus::Warning,
                    details: String::new(),
                    evidence_ref: String::new(),
                }),
                Role::Regulator,
            ),
            _ => (
                Action::CreateShipment(ew_03_shipment_tracker::CreateShipmentRequest {
                    waste_id,
                    producer: PRODUCER,
                    receiver: RECYCLER,
                    tracking_code: "TRK-PROP".into(),
                    location: String::new(),
                    notes: String::new(),
                }),
                Role::Logistics,
            ),
        }
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_certificate_gates(steps in prop::collection::vec(arb_step(), 0..8)) {
            let h = Harness::onboarded();
            let item = h.log_waste();

            let mut processed = false;
            let mut compliant = false;
            for step in &steps {
                match step {
                    Step::Process => {
                        let _ = h.api().mark_processed(RECYCLER, item.id);
                        processed = true;
                    }
                    Step::Audit(status) => {
                        h.audit(item.id, *status).unwrap();
                        compliant |= *status == AuditStatus::Compliant;
                    }
                }
            }

            let result = h.certify(item.id);
            match (processed, compliant) {
                (false, _) => prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::NotProcessed),
                (true, false) => {
                    prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::NoCompliantAudit)
                }
                (true, true) => prop_assert!(result.is_ok()),
            }
        }

        #[test]
        fn prop_shipment_status_monotone(
            targets in prop::collection::vec(arb_shipment_status(), 1..10)
        ) {
            let h = Harness::onboarded();
            let shipment = h.ship(h.log_waste().id);

            let mut current = ShipmentStatus::Pending;
            for target in targets {
                let result = h.move_to(shipment.id, target);
                if current.is_terminal() {
                    prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::TerminalState);
                    continue;
                }
                let allowed = match (current.rank(), target.rank()) {
                    (_, None) => true,
                    (Some(from), Some(to)) => to >= from,
                    (None, Some(_)) => false,
                };
                if allowed {
                    prop_assert_eq!(result.unwrap().shipment.status, target);
                    current = target;
                } else {
                    prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidTransition);
                }
            }

            let Outcome::Shipment(stored) = h
                .api()
                .execute(STRANGER, Action::GetShipment { shipment_id: shipment.id })
                .unwrap()
            else {
                panic!("expected shipment");
            };
            prop_assert_eq!(stored.status, current);
        }

        #[test]
        fn prop_processed_exactly_once(attempts in 1usize..6) {
            let h = Harness::onboarded();
            let item = h.log_waste();

            let first = h.api().mark_processed(RECYCLER, item.id).unwrap();
            prop_assert!(first.is_processed);
            let stamped_at = first.processed_at;

            for _ in 1..attempts {
                let err = h.api().mark_processed(RECYCLER, item.id).unwrap_err();
                prop_assert_eq!(err.kind(), ErrorKind::AlreadyProcessed);
            }

            let Outcome::Waste(stored) = h
                .api()
                .execute(STRANGER, Action::GetWaste { waste_id: item.id })
                .unwrap()
            else {
                panic!("expected waste item");
            };
            prop_assert_eq!(stored.processed_at, stamped_at);
            prop_assert_eq!(stored.processed_by, Some(RECYCLER));
        }

        #[test]
        fn prop_one_case_per_non_compliant_audit(
            statuses in prop::collection::vec(arb_audit_status(), 0..10)
        ) {
            let h = Harness::onboarded();
            let item = h.log_waste();
            for status in &statuses {
                h.audit(item.id, *status).unwrap();
            }

            let Outcome::NonComplianceRecords(cases) = h
                .api()
                .execute(STRANGER, Action::ListNonCompliance(NonComplianceFilter::default()))
                .unwrap()
            else {
                panic!("expected records");
            };
            let expected = statuses
                .iter()
                .filter(|s| **s == AuditStatus::NonCompliant)
                .count();
            prop_assert_eq!(cases.len(), expected);
            for case in &cases {
                prop_assert_eq!(case.responsible, PRODUCER);
                prop_assert_eq!(case.status, NonComplianceStatus::Open);
                prop_assert_eq!(case.waste_id, item.id);
            }
        }

        #[test]
        fn prop_mutations_check_role(role in arb_working_role(), index in 0usize..4) {
            let h = Harness::onboarded();
            let item = h.log_waste();
            let caller = random_actor();
            if let Some(role) = role {
                h.register(caller, role);
            }

            let (action, needed) = guarded_action(index, item.id);
            let result = h.api().execute(caller, action);
            match role {
                None => prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::NotRegistered),
                Some(held) if held == needed => prop_assert!(result.is_ok()),
                Some(_) => prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::Unauthorized),
            }
        }
    }
}
