//! # Custody Benchmarks
//!
//! Hot paths of the custody stack, measured through the orchestrator:
//!
//! | Group | Operation |
//! |-------|-----------|
//! | ew-02-waste-store | `log_waste` batches |
//! | ew-03-shipment-tracker | status updates on open shipments |
//! | ew-04-compliance-engine | eligibility with growing audit history |
//! | ew-05-lifecycle-orchestrator | log → ship → deliver → process → audit → certify |

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ew_03_shipment_tracker::ShipmentStatus;
use ew_04_compliance_engine::AuditStatus;
use ew_05_lifecycle_orchestrator::{Action, LifecycleApi};
use ew_tests::fixtures::{waste_request, Harness, PRODUCER, RECYCLER, STRANGER};
use rand::Rng;

// ============================================================================
// EW-02: Waste logging
// ============================================================================

fn bench_log_waste(c: &mut Criterion) {
    let mut group = c.benchmark_group("ew-02-waste-store");

    for size in [10u64, 100, 1_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("log_waste_batch", size), &size, |b, &size| {
            b.iter_with_setup(Harness::onboarded, |h| {
                let mut rng = rand::thread_rng();
                for _ in 0..size {
                    let request = waste_request(rng.gen_range(1..500), rng.gen_range(1..90));
                    black_box(h.api().log_waste(PRODUCER, request).ok());
                }
            })
        });
    }

    group.finish();
}

// ============================================================================
// EW-03: Shipment updates
// ============================================================================

fn bench_shipment_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("ew-03-shipment-tracker");

    group.bench_function("pickup_transit_deliver", |b| {
        b.iter_with_setup(
            || {
                let h = Harness::onboarded();
                let shipment = h.ship(h.log_waste().id);
                (h, shipment.id)
            },
            |(h, id)| {
                for status in [
                    ShipmentStatus::PickedUp,
                    ShipmentStatus::InTransit,
                    ShipmentStatus::Delivered,
                ] {
                    black_box(h.move_to(id, status).ok());
                }
            },
        )
    });

    // Same-status location pings on one long-lived shipment.
    let h = Harness::onboarded();
    let shipment = h.ship(h.log_waste().id);
    group.bench_function("location_ping", |b| {
        b.iter(|| black_box(h.move_to(shipment.id, ShipmentStatus::InTransit).ok()))
    });

    group.finish();
}

// ============================================================================
// EW-04: Eligibility
// ============================================================================

fn bench_eligibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("ew-04-compliance-engine");

    for audits in [1usize, 50, 500] {
        let h = Harness::onboarded();
        let item = h.log_waste();
        h.api().mark_processed(RECYCLER, item.id).ok();
        for _ in 1..audits {
            h.audit(item.id, AuditStatus::Warning).ok();
        }
        h.audit(item.id, AuditStatus::Compliant).ok();

        group.bench_with_input(BenchmarkId::new("eligibility", audits), &item.id, |b, &id| {
            b.iter(|| {
                black_box(
                    h.api()
                        .execute(STRANGER, Action::Eligibility { waste_id: id })
                        .ok(),
                )
            })
        });
    }

    group.finish();
}

// ============================================================================
// EW-05: Full lifecycle
// ============================================================================

fn bench_full_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("ew-05-lifecycle-orchestrator");
    group.measurement_time(Duration::from_secs(10));

    let h = Harness::onboarded();
    group.bench_function("log_to_certificate", |b| {
        b.iter(|| {
            let item = h.log_waste();
            let shipment = h.ship(item.id);
            h.move_to(shipment.id, ShipmentStatus::Delivered).ok();
            h.api().mark_processed(RECYCLER, item.id).ok();
            h.audit(item.id, AuditStatus::Compliant).ok();
            black_box(h.certify(item.id).ok())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_log_waste,
    bench_shipment_updates,
    bench_eligibility,
    bench_full_lifecycle,
);
criterion_main!(benches);
