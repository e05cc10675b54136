//! Supervision-tree end-to-end scenarios: spec §8 scenarios 3-6.
//!
//! Scenarios 1-2 (basic ping/pong, one and two localities) live in
//! `ping_pong_tests.rs`; this file covers the policy/resource-guard/nested-
//! tree scenarios that exercise the child manager and the lifecycle
//! resource guard.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use nodal_rt::locality::{Locality, LocalityDirectory};
use nodal_rt::message::Message;
use nodal_rt::supervisor::{Supervisor, SupervisorConfig, SupervisorPolicy};
use nodal_rt::util::LocalityId;
use nodal_rt::ActorState;
use nodal_rt::ShutdownReason;

fn root_with_policy(policy: SupervisorPolicy) -> Supervisor {
    let locality = Arc::new(Locality::new(LocalityId::new()));
    let directory = Arc::new(LocalityDirectory::new());
    Supervisor::root(
        locality,
        directory,
        SupervisorConfig::default().timeout(Duration::from_millis(1000)).policy(policy),
    )
    .expect("valid supervisor config")
}

// ============================================================================
// SCENARIO 3: init-timeout with `shutdown_self`
// ============================================================================

#[test]
fn init_timeout_with_shutdown_self_shuts_down_supervisor_and_child() {
    let supervisor = root_with_policy(SupervisorPolicy::ShutdownSelf);
    let child = supervisor.create_actor().timeout(Duration::from_millis(500)).finish().expect("valid child config");
    supervisor.do_process();
    assert_eq!(child.state(), ActorState::Operational);

    // Re-arm: drive the child back into INITIALIZING isn't part of the
    // public surface, so this scenario is exercised against a child still
    // mid-init instead, matching the unit-level coverage in
    // `plugin::child_manager::tests::simulate_init_timeout_with_shutdown_self_escalates`.
    let supervisor = root_with_policy(SupervisorPolicy::ShutdownSelf);
    let child = supervisor.create_actor().timeout(Duration::from_millis(500)).finish().expect("valid child config");
    let child_address = child.address();

    supervisor.simulate_child_init_timeout(child_address);
    supervisor.do_process();

    assert_eq!(supervisor.state(), ActorState::ShutDown);
    assert_eq!(child.state(), ActorState::ShutDown);
}

// ============================================================================
// SCENARIO 4: init-timeout with `shutdown_failed`
// ============================================================================

#[test]
fn init_timeout_with_shutdown_failed_keeps_supervisor_and_siblings_operational() {
    let supervisor = root_with_policy(SupervisorPolicy::ShutdownFailed);
    let survivor = supervisor.create_actor().timeout(Duration::from_millis(500)).finish().expect("valid survivor config");
    let doomed = supervisor.create_actor().timeout(Duration::from_millis(500)).finish().expect("valid doomed config");
    let doomed_address = doomed.address();

    supervisor.simulate_child_init_timeout(doomed_address);
    supervisor.do_process();

    assert_eq!(supervisor.state(), ActorState::Operational);
    assert_eq!(survivor.state(), ActorState::Operational);
    assert_eq!(doomed.state(), ActorState::ShutDown);
}

// ============================================================================
// SCENARIO 5: resource-guarded shutdown
// ============================================================================

#[test]
fn resource_guard_blocks_shutdown_until_released() {
    let supervisor = root_with_policy(SupervisorPolicy::ShutdownSelf);
    let actor = supervisor.create_actor().timeout(Duration::from_millis(500)).finish().expect("valid actor config");
    supervisor.do_process();
    assert_eq!(actor.state(), ActorState::Operational);

    actor.cell().lock().acquire_resource();

    actor.do_shutdown(ShutdownReason::Normal);
    supervisor.do_process();
    assert_eq!(actor.state(), ActorState::ShuttingDown);

    actor.cell().lock().release_resource();
    supervisor.do_process();
    assert_eq!(actor.state(), ActorState::ShutDown);
}

// ============================================================================
// SCENARIO 6: supervisor tree
// ============================================================================

#[derive(Debug, Clone)]
struct Ping;
impl Message for Ping {
    const MESSAGE_TYPE: &'static str = "ping";
}

#[derive(Default)]
struct Counters {
    ping_sent: AtomicU32,
    ping_received: AtomicU32,
}

#[test]
fn nested_supervisor_tree_delivers_ping_and_ponger_self_shuts_down() {
    let locality = Arc::new(Locality::new(LocalityId::new()));
    let directory = Arc::new(LocalityDirectory::new());
    let root = Supervisor::root(locality, directory, SupervisorConfig::default().timeout(Duration::from_millis(1000)))
        .expect("valid root config");

    let s_a1 = root
        .create_supervisor(SupervisorPolicy::ShutdownSelf, false)
        .timeout(Duration::from_millis(1000))
        .finish()
        .expect("valid S_A1 config");
    let s_b1 = root
        .create_supervisor(SupervisorPolicy::ShutdownSelf, false)
        .timeout(Duration::from_millis(1000))
        .finish()
        .expect("valid S_B1 config");
    root.do_process();

    let s_a2 = s_a1
        .create_supervisor(SupervisorPolicy::ShutdownSelf, false)
        .timeout(Duration::from_millis(1000))
        .finish()
        .expect("valid S_A2 config");
    let s_b2 = s_b1
        .create_supervisor(SupervisorPolicy::ShutdownSelf, false)
        .timeout(Duration::from_millis(1000))
        .finish()
        .expect("valid S_B2 config");
    root.do_process();

    let pinger = s_a2.create_actor().finish().expect("valid pinger config");
    let ponger = s_b2.create_actor().finish().expect("valid ponger config");
    root.do_process();

    assert_eq!(s_a1.state(), ActorState::Operational);
    assert_eq!(s_b1.state(), ActorState::Operational);
    assert_eq!(s_a2.state(), ActorState::Operational);
    assert_eq!(s_b2.state(), ActorState::Operational);
    assert_eq!(pinger.state(), ActorState::Operational);
    assert_eq!(ponger.state(), ActorState::Operational);

    let counters = Arc::new(Counters::default());
    let c = Arc::clone(&counters);
    let ponger_handle = ponger.clone();
    ponger.subscribe::<Ping, _>(None, move |_env| {
        c.ping_received.fetch_add(1, Ordering::SeqCst);
        ponger_handle.do_shutdown(ShutdownReason::Normal);
    });

    counters.ping_sent.fetch_add(1, Ordering::SeqCst);
    pinger.send(ponger.address(), Ping);
    root.do_process();

    assert_eq!(counters.ping_sent.load(Ordering::SeqCst), 1);
    assert_eq!(counters.ping_received.load(Ordering::SeqCst), 1);
    assert_eq!(ponger.state(), ActorState::ShutDown);

    root.do_shutdown(ShutdownReason::Normal);
    root.do_process();

    assert_eq!(root.state(), ActorState::ShutDown);
    assert_eq!(s_a1.state(), ActorState::ShutDown);
    assert_eq!(s_b1.state(), ActorState::ShutDown);
    assert_eq!(s_a2.state(), ActorState::ShutDown);
    assert_eq!(s_b2.state(), ActorState::ShutDown);
    assert_eq!(pinger.state(), ActorState::ShutDown);
}
