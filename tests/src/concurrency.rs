//! # Concurrency Tests
//!
//! Racing writers against one stack. Every race must end with exactly one
//! winner and losers that report the specific rule they hit.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;

    use std::collections::BTreeSet;
    use std::sync::Barrier;
    use std::thread;

    use ew_03_shipment_tracker::ShipmentStatus;
    use ew_05_lifecycle_orchestrator::{Action, LifecycleApi, Outcome};
    use shared_types::{ActorId, ErrorKind, HasErrorKind, Role};

    const WRITERS: usize = 8;

    #[test]
    fn test_racing_recyclers_process_once() {
        let h = Harness::onboarded();
        let recyclers: Vec<ActorId> = (0..WRITERS).map(|_| random_actor()).collect();
        for recycler in &recyclers {
            h.register(*recycler, Role::Recycler);
        }
        let item = h.log_waste();
        let id = item.id;
        let barrier = Barrier::new(WRITERS);

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = recyclers
                .iter()
                .map(|recycler| {
                    let (h, barrier) = (&h, &barrier);
                    s.spawn(move || {
                        barrier.wait();
                        h.api().mark_processed(*recycler, id)
                    })
                })
                .collect();
            handles.into_iter().map(|t| t.join().unwrap()).collect()
        });

        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert_eq!(err.kind(), ErrorKind::AlreadyProcessed);
        }

        let Outcome::Waste(stored) = h
            .api()
            .execute(STRANGER, Action::GetWaste { waste_id: id })
            .unwrap()
        else {
            panic!("expected waste item");
        };
        assert_eq!(stored.processed_by, winners[0].processed_by);
    }

    #[test]
    fn test_delivered_and_cancelled_race() {
        for _ in 0..20 {
            let h = Harness::onboarded();
            let shipment = h.ship(h.log_waste().id);
            let barrier = Barrier::new(2);

            let (delivered, cancelled) = thread::scope(|s| {
                let deliver = s.spawn(|| {
                    barrier.wait();
                    h.move_to(shipment.id, ShipmentStatus::Delivered)
                });
                let cancel = s.spawn(|| {
                    barrier.wait();
                    h.move_to(shipment.id, ShipmentStatus::Cancelled)
                });
                (deliver.join().unwrap(), cancel.join().unwrap())
            });

            let (winner, loser) = match (delivered, cancelled) {
                (Ok(won), Err(lost)) | (Err(lost), Ok(won)) => (won, lost),
                other => panic!("expected exactly one winner, got {other:?}"),
            };
            assert_eq!(loser.kind(), ErrorKind::TerminalState);

            let Outcome::Shipment(stored) = h
                .api()
                .execute(STRANGER, Action::GetShipment { shipment_id: shipment.id })
                .unwrap()
            else {
                panic!("expected shipment");
            };
            assert_eq!(stored.status, winner.shipment.status);
        }
    }

    #[test]
    fn test_concurrent_logging_assigns_unique_ids() {
        const PER_WRITER: usize = 25;
        let h = Harness::onboarded();

        let ids: Vec<u64> = thread::scope(|s| {
            let handles: Vec<_> = (0..WRITERS)
                .map(|_| {
                    let h = &h;
                    s.spawn(move || {
                        (0..PER_WRITER)
                            .map(|_| h.log_waste().id.0)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|t| t.join().unwrap())
                .collect()
        });

        let total = (WRITERS * PER_WRITER) as u64;
        let unique: BTreeSet<u64> = ids.into_iter().collect();
        assert_eq!(unique, (1..=total).collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_racing_self_registration() {
        let h = Harness::new();
        let actor = random_actor();
        let barrier = Barrier::new(WRITERS);
        let roles = [Role::Producer, Role::Recycler, Role::Logistics, Role::Regulator];

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..WRITERS)
                .map(|i| {
                    let (h, barrier) = (&h, &barrier);
                    let role = roles[i % roles.len()];
                    s.spawn(move || {
                        barrier.wait();
                        h.api().register(actor, "Racer", role, "")
                    })
                })
                .collect();
            handles.into_iter().map(|t| t.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert_eq!(err.kind(), ErrorKind::AlreadyRegistered);
        }
    }

    #[test]
    fn test_readers_see_whole_rows() {
        let h = Harness::onboarded();
        let items: Vec<_> = (0..50).map(|_| h.log_waste().id).collect();

        thread::scope(|s| {
            s.spawn(|| {
                for id in &items {
                    h.api().mark_processed(RECYCLER, *id).unwrap();
                }
            });
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..20 {
                        let Outcome::WasteItems(all) =
                            h.api().execute(STRANGER, Action::ListWaste).unwrap()
                        else {
                            panic!("expected waste items");
                        };
                        for item in all {
                            assert_eq!(item.is_processed, item.processed_by.is_some());
                            assert_eq!(item.is_processed, item.processed_at.is_some());
                        }
                    }
                });
            }
        });

        let Outcome::WasteItems(left) = h.api().execute(STRANGER, Action::ListUnprocessed).unwrap()
        else {
            panic!("expected waste items");
        };
        assert!(left.is_empty());
    }
}
