//! # Custody Scenarios
//!
//! End-to-end flows across all five subsystems:
//!
//! 1. Logging → shipment → delivery → terminal status
//! 2. Processing → compliant audit → certificate
//! 3. Certificate refused without a compliant audit
//! 4. Non-compliant audit opens a case against the producer
//!
//! Plus the flows around them: admin handover, overdue items, snapshot
//! restore and the bus trail of a full lifecycle.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;

    use custody_runtime::{CustodyContainer, RuntimeConfig};
    use ew_03_shipment_tracker::ShipmentStatus;
    use ew_04_compliance_engine::{AuditStatus, NonComplianceFilter, NonComplianceStatus};
    use ew_05_lifecycle_orchestrator::{Action, LifecycleApi, Outcome};
    use rust_decimal::Decimal;
    use shared_bus::CustodyEvent;
    use shared_types::{ErrorKind, HasErrorKind, Role, SECONDS_PER_DAY};

    // =========================================================================
    // SCENARIO 1: LOGGING AND TRANSPORT
    // =========================================================================

    #[test]
    fn test_scenario_1_shipment_runs_to_terminal() {
        let h = Harness::onboarded();

        let item = h.log_waste();
        assert_eq!(item.quantity, Decimal::new(10, 0));
        assert_eq!(item.deadline, GENESIS + 30 * SECONDS_PER_DAY);
        assert!(!item.is_processed);

        let shipment = h.ship(item.id);
        assert_eq!(shipment.status, ShipmentStatus::Pending);
        assert_eq!(shipment.location, "Origin");

        for status in [
            ShipmentStatus::PickedUp,
            ShipmentStatus::InTransit,
            ShipmentStatus::Delivered,
        ] {
            let transition = h.move_to(shipment.id, status).unwrap();
            assert_eq!(transition.shipment.status, status);
        }

        let err = h.move_to(shipment.id, ShipmentStatus::InTransit).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TerminalState);

        let err = h.move_to(shipment.id, ShipmentStatus::Cancelled).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TerminalState);
    }

    #[test]
    fn test_other_transporter_cannot_move_shipment() {
        let h = Harness::onboarded();
        let rival = random_actor();
        h.register(rival, Role::Logistics);

        let shipment = h.ship(h.log_waste().id);
        let err = h
            .api()
            .execute(
                rival,
                Action::UpdateShipment(ew_03_shipment_tracker::StatusUpdate {
                    shipment_id: shipment.id,
                    status: ShipmentStatus::PickedUp,
                    location: String::new(),
                    notes: String::new(),
                }),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let Outcome::Shipments(owned) = h.api().execute(rival, Action::ListShipments).unwrap()
        else {
            panic!("expected shipments");
        };
        assert!(owned.is_empty());
    }

    #[test]
    fn test_processed_waste_cannot_ship() {
        let h = Harness::onboarded();
        let item = h.log_waste();
        h.api().mark_processed(RECYCLER, item.id).unwrap();

        let err = h
            .api()
            .execute(
                CARRIER,
                Action::CreateShipment(ew_03_shipment_tracker::CreateShipmentRequest {
                    waste_id: item.id,
                    producer: PRODUCER,
                    receiver: RECYCLER,
                    tracking_code: "TRK-LATE".into(),
                    location: String::new(),
                    notes: String::new(),
                }),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    // =========================================================================
    // SCENARIO 2: PROCESSING AND CERTIFICATION
    // =========================================================================

    #[test]
    fn test_scenario_2_compliant_item_is_certified() {
        let h = Harness::onboarded();
        let item = h.log_waste();

        let processed = h.api().mark_processed(RECYCLER, item.id).unwrap();
        assert!(processed.is_processed);
        assert_eq!(processed.processed_by, Some(RECYCLER));

        let receipt = h.audit(item.id, AuditStatus::Compliant).unwrap();
        assert!(receipt.non_compliance.is_none());

        let certificate = h.certify(item.id).unwrap();
        assert_eq!(certificate.waste_id, item.id);
        assert_eq!(certificate.issuer, REGULATOR);
        assert_eq!(certificate.recipient, RECYCLER);

        let Outcome::Certificates(issued) = h
            .api()
            .execute(STRANGER, Action::ListCertificates { waste_id: Some(item.id) })
            .unwrap()
        else {
            panic!("expected certificates");
        };
        assert_eq!(issued, vec![certificate]);
    }

    #[test]
    fn test_later_non_compliant_audit_keeps_eligibility() {
        let h = Harness::onboarded();
        let item = h.log_waste();
        h.api().mark_processed(RECYCLER, item.id).unwrap();
        h.audit(item.id, AuditStatus::Compliant).unwrap();
        h.audit(item.id, AuditStatus::NonCompliant).unwrap();

        assert!(h.certify(item.id).is_ok());
    }

    // =========================================================================
    // SCENARIO 3: CERTIFICATE GATES
    // =========================================================================

    #[test]
    fn test_scenario_3_no_compliant_audit() {
        let h = Harness::onboarded();
        let item = h.log_waste();
        h.api().mark_processed(RECYCLER, item.id).unwrap();
        h.audit(item.id, AuditStatus::Warning).unwrap();

        let err = h.certify(item.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoCompliantAudit);

        let Outcome::Eligibility(eligibility) = h
            .api()
            .execute(STRANGER, Action::Eligibility { waste_id: item.id })
            .unwrap()
        else {
            panic!("expected eligibility");
        };
        assert!(eligibility.processed);
        assert_eq!(eligibility.compliant_audits, 0);
    }

    #[test]
    fn test_unprocessed_item_not_certified() {
        let h = Harness::onboarded();
        let item = h.log_waste();
        h.audit(item.id, AuditStatus::Compliant).unwrap();

        let err = h.certify(item.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotProcessed);
    }

    // =========================================================================
    // SCENARIO 4: NON-COMPLIANCE
    // =========================================================================

    #[test]
    fn test_scenario_4_non_compliant_audit_opens_case() {
        let h = Harness::onboarded();
        let item = h.log_waste();

        let receipt = h.audit(item.id, AuditStatus::NonCompliant).unwrap();
        let case = receipt.non_compliance.clone().unwrap();
        assert_eq!(case.waste_id, item.id);
        assert_eq!(case.audit_id, receipt.audit.id);
        assert_eq!(case.responsible, PRODUCER);
        assert_eq!(case.status, NonComplianceStatus::Open);

        let Outcome::NonComplianceRecords(open) = h
            .api()
            .execute(
                STRANGER,
                Action::ListNonCompliance(NonComplianceFilter {
                    status: Some(NonComplianceStatus::Open),
                    responsible: Some(PRODUCER),
                }),
            )
            .unwrap()
        else {
            panic!("expected records");
        };
        assert_eq!(open, vec![case.clone()]);

        let Outcome::Audits(audits) = h
            .api()
            .execute(STRANGER, Action::ListAudits { waste_id: Some(item.id) })
            .unwrap()
        else {
            panic!("expected audits");
        };
        assert_eq!(audits, vec![receipt.audit]);
    }

    #[test]
    fn test_case_moves_forward_only() {
        let h = Harness::onboarded();
        let item = h.log_waste();
        let case = h
            .audit(item.id, AuditStatus::NonCompliant)
            .unwrap()
            .non_compliance
            .unwrap();

        let resolve = |status| {
            h.api().resolve_non_compliance(
                REGULATOR,
                ew_04_compliance_engine::CaseUpdate {
                    record_id: case.id,
                    status,
                },
            )
        };

        assert!(resolve(NonComplianceStatus::InProgress).is_ok());
        assert_eq!(
            resolve(NonComplianceStatus::Open).unwrap_err().kind(),
            ErrorKind::InvalidTransition
        );
        assert!(resolve(NonComplianceStatus::Resolved).is_ok());
        assert_eq!(
            resolve(NonComplianceStatus::InProgress).unwrap_err().kind(),
            ErrorKind::InvalidTransition
        );
    }

    // =========================================================================
    // IDENTITY
    // =========================================================================

    #[test]
    fn test_self_service_role_change_refused() {
        let h = Harness::onboarded();
        let err = h
            .api()
            .register(PRODUCER, "Acme", Role::Regulator, "")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyRegistered);

        let reassigned = h
            .api()
            .assign_role(ADMIN, PRODUCER, "Acme Audit Desk", Role::Regulator, "")
            .unwrap();
        assert_eq!(reassigned.role, Role::Regulator);
        assert_eq!(
            h.api()
                .log_waste(PRODUCER, waste_request(1, 1))
                .unwrap_err()
                .kind(),
            ErrorKind::Unauthorized
        );
    }

    #[test]
    fn test_admin_handover_keeps_single_admin() {
        let h = Harness::onboarded();
        let successor = random_actor();

        let change = h.api().change_admin(ADMIN, successor).unwrap();
        assert_eq!(change.previous, ADMIN);
        assert_eq!(change.current, successor);

        let Outcome::Actors(admins) = h
            .api()
            .execute(STRANGER, Action::ListActors { role: Role::Admin })
            .unwrap()
        else {
            panic!("expected actors");
        };
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].id, successor);

        // The previous admin lost the seat.
        let err = h.api().change_admin(ADMIN, ADMIN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        // Repeating the handover from the new seat is a no-op.
        assert!(!h.api().change_admin(successor, successor).unwrap().changed());
    }

    // =========================================================================
    // READ PROJECTIONS
    // =========================================================================

    #[test]
    fn test_overdue_and_unprocessed_track_writes() {
        let h = Harness::onboarded();
        let short = h
            .api()
            .log_waste(PRODUCER, waste_request(3, 1))
            .unwrap();
        let long = h.log_waste();

        let unprocessed = |h: &Harness| match h.api().execute(STRANGER, Action::ListUnprocessed) {
            Ok(Outcome::WasteItems(items)) => items.into_iter().map(|i| i.id).collect::<Vec<_>>(),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(unprocessed(&h), vec![short.id, long.id]);

        h.clock.advance(2 * SECONDS_PER_DAY);
        let Outcome::WasteItems(overdue) =
            h.api().execute(STRANGER, Action::ListOverdue).unwrap()
        else {
            panic!("expected waste items");
        };
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, short.id);

        h.api().mark_processed(RECYCLER, short.id).unwrap();
        assert_eq!(unprocessed(&h), vec![long.id]);
    }

    // =========================================================================
    // EVENTS AND PERSISTENCE
    // =========================================================================

    #[test]
    fn test_rejected_actions_publish_nothing() {
        let h = Harness::onboarded();
        let item = h.log_waste();
        let mut sub = h.subscribe();

        assert!(h.certify(item.id).is_err());
        assert!(h.api().mark_processed(PRODUCER, item.id).is_err());
        assert!(h.move_to(shipment_id_that_does_not_exist(), ShipmentStatus::PickedUp).is_err());

        assert!(sub.drain().is_empty());
    }

    fn shipment_id_that_does_not_exist() -> shared_types::ShipmentId {
        shared_types::ShipmentId(999)
    }

    #[test]
    fn test_lifecycle_event_trail() {
        let h = Harness::onboarded();
        let mut sub = h.subscribe();

        let item = h.log_waste();
        h.api().mark_processed(RECYCLER, item.id).unwrap();
        h.audit(item.id, AuditStatus::NonCompliant).unwrap();

        let trail: Vec<_> = sub.drain().into_iter().map(|m| m.event).collect();
        assert!(matches!(trail[0], CustodyEvent::WasteLogged { .. }));
        assert!(matches!(trail[1], CustodyEvent::WasteProcessed { recycler, .. } if recycler == RECYCLER));
        assert!(matches!(trail[2], CustodyEvent::AuditRecorded { .. }));
        assert!(matches!(trail[3], CustodyEvent::NonComplianceOpened { responsible, .. } if responsible == PRODUCER));
        assert_eq!(trail.len(), 4);
    }

    #[test]
    fn test_snapshot_restores_full_state() {
        let h = Harness::onboarded();
        let item = h.log_waste();
        let shipment = h.ship(item.id);
        h.move_to(shipment.id, ShipmentStatus::PickedUp).unwrap();
        h.audit(item.id, AuditStatus::NonCompliant).unwrap();

        let saved = h.container.snapshot();
        let restored = CustodyContainer::new(
            RuntimeConfig {
                admin: ADMIN,
                ..RuntimeConfig::default()
            },
            h.clock.clone(),
            Some(saved),
        )
        .unwrap();

        let api = restored.orchestrator.as_ref();
        let Outcome::Shipment(reloaded) = api
            .execute(STRANGER, Action::GetShipment { shipment_id: shipment.id })
            .unwrap()
        else {
            panic!("expected shipment");
        };
        assert_eq!(reloaded.status, ShipmentStatus::PickedUp);

        // Sequences continue after the restored ids.
        let next = api.log_waste(PRODUCER, waste_request(5, 5)).unwrap();
        assert_eq!(next.id.0, item.id.0 + 1);
    }

    // =========================================================================
    // RUNTIME PROTOCOL
    // =========================================================================

    #[tokio::test]
    async fn test_json_lines_lifecycle() {
        use custody_runtime::{CustodyRuntime, ServeStats};
        use serde_json::{json, Value};
        use shared_types::ManualClock;
        use std::sync::Arc;

        let runtime = CustodyRuntime::new(
            RuntimeConfig {
                admin: ADMIN,
                ..RuntimeConfig::default()
            },
            Arc::new(ManualClock::new(GENESIS)),
        )
        .unwrap();

        let line = |caller, action: Value| json!({ "caller": caller, "action": action }).to_string();
        let certify = line(
            REGULATOR,
            json!({
                "action": "issue_certificate",
                "waste_id": 1,
                "recipient": RECYCLER,
                "certificate_type": "Recycling"
            }),
        );
        let input = [
            line(PRODUCER, json!({ "action": "register", "name": "Acme", "role": "Producer" })),
            line(RECYCLER, json!({ "action": "register", "name": "ReCo", "role": "Recycler" })),
            line(REGULATOR, json!({ "action": "register", "name": "EPA", "role": "Regulator" })),
            line(
                PRODUCER,
                json!({
                    "action": "log_waste",
                    "waste_type": "CRT monitors",
                    "origin": "Depot 4",
                    "quantity": "12.5",
                    "deadline_days": 14
                }),
            ),
            certify.clone(),
            line(RECYCLER, json!({ "action": "mark_processed", "waste_id": 1 })),
            line(
                REGULATOR,
                json!({ "action": "submit_audit", "waste_id": 1, "status": "Compliant" }),
            ),
            certify.clone(),
        ]
        .join("\n");

        let mut output = Vec::new();
        let stats = runtime.serve(input.as_bytes(), &mut output).await.unwrap();
        assert_eq!(
            stats,
            ServeStats {
                handled: 8,
                rejected: 1
            }
        );

        let replies: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies[3]["ok"]["kind"], "waste");
        assert_eq!(replies[4]["error"]["kind"], "not_processed");
        assert_eq!(replies[7]["ok"]["kind"], "certificate");
        assert_eq!(replies[7]["ok"]["data"]["waste_id"], 1);
    }
}
