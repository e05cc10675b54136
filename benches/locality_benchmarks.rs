//! Locality / Message Loop Benchmarks
//!
//! Measures baseline performance of the FIFO drain path (spec C5):
//! - Single envelope delivery latency
//! - Batch envelope delivery throughput
//! - Fan-out delivery to many subscription points on the same address

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::any::TypeId;
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};
use parking_lot::Mutex;

// Layer 3: Internal module imports
use nodal_rt::locality::Locality;
use nodal_rt::message::{Envelope, Message};
use nodal_rt::subscription::{Handler, OwnerTag, SubscriptionPoint};
use nodal_rt::util::{ActorId, Address, LocalityId};

#[derive(Debug, Clone)]
struct BenchPing(u64);

impl Message for BenchPing {
    const MESSAGE_TYPE: &'static str = "BenchPing";
}

fn counting_point(address: Address, counter: &Arc<AtomicU64>) -> SubscriptionPoint {
    let counter = Arc::clone(counter);
    let handler: Arc<Mutex<dyn Handler>> = Arc::new(Mutex::new(move |_env: &Envelope| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));
    SubscriptionPoint::new(address, TypeId::of::<BenchPing>(), ActorId::new(), OwnerTag::Plain, handler)
}

/// Benchmark: enqueue + drain a single envelope to a single subscriber.
fn locality_single_envelope(c: &mut Criterion) {
    c.bench_function("locality_single_envelope", |b| {
        b.iter(|| {
            let locality_id = LocalityId::new();
            let locality = Locality::new(locality_id);
            let address = Address::new(locality_id);
            let counter = Arc::new(AtomicU64::new(0));
            locality.register_subscription(counting_point(address, &counter));

            locality.enqueue(Envelope::new(address, BenchPing(1)));
            locality.do_process();

            black_box(counter.load(Ordering::Relaxed));
        });
    });
}

/// Benchmark: enqueue 100 envelopes up front, then drain them in one pass.
fn locality_batch_drain(c: &mut Criterion) {
    c.bench_function("locality_batch_drain", |b| {
        b.iter(|| {
            let locality_id = LocalityId::new();
            let locality = Locality::new(locality_id);
            let address = Address::new(locality_id);
            let counter = Arc::new(AtomicU64::new(0));
            locality.register_subscription(counting_point(address, &counter));

            for i in 0..100 {
                locality.enqueue(Envelope::new(address, BenchPing(i)));
            }
            locality.do_process();

            black_box(counter.load(Ordering::Relaxed));
        });
    });
}

/// Benchmark: fan-out delivery to 10 subscription points on one address.
fn locality_fan_out_delivery(c: &mut Criterion) {
    c.bench_function("locality_fan_out_delivery", |b| {
        b.iter(|| {
            let locality_id = LocalityId::new();
            let locality = Locality::new(locality_id);
            let address = Address::new(locality_id);
            let counter = Arc::new(AtomicU64::new(0));
            for _ in 0..10 {
                locality.register_subscription(counting_point(address, &counter));
            }

            locality.enqueue(Envelope::new(address, BenchPing(1)));
            locality.do_process();

            black_box(counter.load(Ordering::Relaxed));
        });
    });
}

/// Configure criterion for resource-conscious benchmarking
fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30) // Reduced for resource constraints
        .measurement_time(Duration::from_secs(5)) // Shorter measurement
        .warm_up_time(Duration::from_secs(2)) // Shorter warm-up
        .without_plots() // Save disk I/O
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets =
        locality_single_envelope,
        locality_batch_drain,
        locality_fan_out_delivery
}

criterion_main!(benches);
