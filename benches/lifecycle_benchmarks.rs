//! Actor Lifecycle Benchmarks
//!
//! Measures baseline performance of the plugin-pipeline lifecycle engine
//! (spec C6/C7):
//! - Root supervisor construction (activation + init pass + start trigger)
//! - Single child spawn-to-operational round trip
//! - Batch child spawn (10 children) under one supervisor
//! - Full shutdown of a supervisor with several children

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::hint::black_box;
use std::time::Duration;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use nodal_rt::locality::{Locality, LocalityDirectory};
use nodal_rt::util::LocalityId;
use nodal_rt::{ShutdownReason, Supervisor, SupervisorConfig};
use std::sync::Arc;

fn sample_root() -> Supervisor {
    let locality = Arc::new(Locality::new(LocalityId::new()));
    let directory = Arc::new(LocalityDirectory::new());
    #[allow(clippy::unwrap_used)]
    Supervisor::root(locality, directory, SupervisorConfig::default().timeout(Duration::from_millis(1000))).unwrap()
}

/// Benchmark: construct a root supervisor through to OPERATIONAL.
fn root_supervisor_construction(c: &mut Criterion) {
    c.bench_function("root_supervisor_construction", |b| {
        b.iter(|| {
            let supervisor = sample_root();
            black_box(supervisor.state());
        });
    });
}

/// Benchmark: spawn a single child and drain it to OPERATIONAL.
fn single_child_spawn(c: &mut Criterion) {
    c.bench_function("single_child_spawn", |b| {
        b.iter(|| {
            let supervisor = sample_root();
            #[allow(clippy::unwrap_used)]
            let child = supervisor.create_actor().timeout(Duration::from_millis(500)).finish().unwrap();
            supervisor.do_process();
            black_box(child.state());
        });
    });
}

/// Benchmark: spawn 10 children under one supervisor in a batch.
fn batch_child_spawn_small(c: &mut Criterion) {
    c.bench_function("batch_child_spawn_small", |b| {
        b.iter(|| {
            let supervisor = sample_root();
            let mut children = Vec::with_capacity(10);
            for _ in 0..10 {
                #[allow(clippy::unwrap_used)]
                let child = supervisor.create_actor().timeout(Duration::from_millis(500)).finish().unwrap();
                children.push(child);
            }
            supervisor.do_process();
            black_box(children);
        });
    });
}

/// Benchmark: shut down a supervisor with 10 children, cascading through
/// the child manager's reverse-order shutdown pass.
fn supervisor_shutdown_cascade(c: &mut Criterion) {
    c.bench_function("supervisor_shutdown_cascade", |b| {
        b.iter(|| {
            let supervisor = sample_root();
            for _ in 0..10 {
                #[allow(clippy::unwrap_used)]
                let _child = supervisor.create_actor().timeout(Duration::from_millis(500)).finish().unwrap();
            }
            supervisor.do_process();

            supervisor.do_shutdown(ShutdownReason::Normal);
            supervisor.do_process();

            black_box(supervisor.state());
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
        root_supervisor_construction,
        single_child_spawn,
        batch_child_spawn_small,
        supervisor_shutdown_cascade
}

criterion_main!(benches);
